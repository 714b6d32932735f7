//! Run-length coding of grid planes

use proptest::prelude::*;
use sil_save::codec::{Reader, Writer};
use sil_save::rle::{MAX_RUN, rle_decode, rle_encode};

fn roundtrip(plane: &[Vec<u8>], width: usize) -> (Vec<Vec<u8>>, usize) {
    let mut w = Writer::new();
    rle_encode(&mut w, plane.len(), width, |y, x| plane[y][x]);
    let bytes = w.into_bytes();

    let mut back = vec![vec![0u8; width]; plane.len()];
    let mut r = Reader::new(&bytes);
    rle_decode(&mut r, plane.len(), width, |y, x, v| back[y][x] = v).unwrap();
    assert!(r.is_at_end());
    (back, bytes.len())
}

#[test]
fn test_uniform_plane() {
    let plane = vec![vec![7u8; 198]; 66];
    let (back, len) = roundtrip(&plane, 198);
    assert_eq!(back, plane);
    // 13068 squares in runs of 255
    assert_eq!(len, 2 * 13068usize.div_ceil(MAX_RUN as usize));
}

#[test]
fn test_alternating_plane() {
    let plane: Vec<Vec<u8>> = (0..5)
        .map(|y| (0..9).map(|x| ((x + y) % 2) as u8).collect())
        .collect();
    let (back, len) = roundtrip(&plane, 9);
    assert_eq!(back, plane);
    assert_eq!(len, 2 * 45);
}

#[test]
fn test_run_exactly_at_cap() {
    let mut row = vec![1u8; 255];
    row.push(2);
    let plane = vec![row];
    let (back, len) = roundtrip(&plane, 256);
    assert_eq!(back, plane);
    assert_eq!(len, 4);
}

proptest! {
    #[test]
    fn plane_survives(
        (width, plane) in (1usize..40).prop_flat_map(|w| {
            (Just(w), prop::collection::vec(prop::collection::vec(0u8..4, w), 1..12))
        })
    ) {
        let (back, _) = roundtrip(&plane, width);
        prop_assert_eq!(back, plane);
    }

    #[test]
    fn runs_never_exceed_cap(len in 1usize..2000, value in any::<u8>()) {
        let plane = vec![vec![value; len]];
        let mut w = Writer::new();
        rle_encode(&mut w, 1, len, |y, x| plane[y][x]);
        let bytes = w.into_bytes();
        prop_assert!(bytes.chunks(2).all(|pair| pair[0] >= 1));
        let total: usize = bytes.chunks(2).map(|pair| pair[0] as usize).sum();
        prop_assert_eq!(total, len);
    }
}
