//! Byte-array views of flag sets
//!
//! Flag sets are stored as `bitflags` integers in memory and as fixed-size
//! little-endian byte arrays on disk. A shorter stored array zero-fills the
//! missing high bytes.

/// Implement byte conversion and bit-level serde for a `bitflags` type.
macro_rules! byte_flags {
    ($name:ident, $int:ty, $size:expr) => {
        impl $name {
            /// Number of bytes in the stored form
            pub const BYTES: usize = $size;

            /// Little-endian stored form
            pub fn to_bytes(self) -> [u8; $size] {
                self.bits().to_le_bytes()
            }

            /// Rebuild from stored bytes; missing bytes read as zero and
            /// unknown bits are kept
            pub fn from_bytes(bytes: &[u8]) -> Self {
                let mut buf = [0u8; $size];
                for (dst, src) in buf.iter_mut().zip(bytes) {
                    *dst = *src;
                }
                Self::from_bits_retain(<$int>::from_le_bytes(buf))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.bits(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bits = <$int as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_bits_retain(bits))
            }
        }
    };
}

pub(crate) use byte_flags;
