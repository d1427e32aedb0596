use std::{
    fmt::{Display, Formatter},
    io::{self, Read, Write},
    str::FromStr,
};

use crate::{
    codec::{invalid_data, WireReadable, WireReader, WireWritable, WireWriter},
    error::UnknownToken,
};

/// A closed enumeration whose variants are named by string tokens.
macro_rules! token_enum {
    ($e:ident: $repr:ident, $($name:ident = $id:literal | $token:literal),* $(,)?) => {
        #[repr($repr)]
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $e {
            $(
                #[doc = concat!("`", $token, "`")]
                $name = $id,
            )*
        }

        impl $e {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$e] = &[$($e::$name,)*];

            pub fn from_repr(n: $repr) -> Option<Self> {
                match n {
                    $($id => Some($e::$name),)*
                    _ => None
                }
            }

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($e::$name => $token,)*
                }
            }
        }

        impl Display for $e {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $e {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($e::$name),)*
                    other => Err(UnknownToken {
                        kind: stringify!($e),
                        token: other.to_owned(),
                    }),
                }
            }
        }
    };
}

token_enum! {
    CompilerFilter: u8,

    AssumeVerified = 0 | "assume-verified",
    Extract = 1 | "extract",
    Verify = 2 | "verify",
    SpaceProfile = 3 | "space-profile",
    Space = 4 | "space",
    SpeedProfile = 5 | "speed-profile",
    Speed = 6 | "speed",
    EverythingProfile = 7 | "everything-profile",
    Everything = 8 | "everything",
    Skip = 9 | "skip",
}

token_enum! {
    MetadataKind: u8,

    Unknown = 0 | "unknown",
    Profile = 1 | "profile",
    MachineCodeImage = 2 | "machine-code-image",
    ProfileAndMachineCodeImage = 3 | "profile-and-machine-code-image",
    None = 4 | "none",
    Error = 5 | "error",
}

impl WireReadable for MetadataKind {
    fn read<R: Read>(read: &mut WireReader<R>) -> io::Result<Self> {
        let n = u8::read(read)?;
        Self::from_repr(n).ok_or_else(|| invalid_data(format!("Unknown metadata kind: {n}")))
    }
}

impl WireWritable for MetadataKind {
    fn write<W: Write>(&self, write: &mut WireWriter<W>) -> io::Result<()> {
        (*self as u8).write(write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for filter in CompilerFilter::ALL {
            assert_eq!(filter.as_str().parse::<CompilerFilter>(), Ok(*filter));
        }
        for kind in MetadataKind::ALL {
            assert_eq!(kind.to_string().parse::<MetadataKind>(), Ok(*kind));
        }
    }

    #[test]
    fn unknown_token() {
        let err = "fast".parse::<CompilerFilter>().unwrap_err();
        assert_eq!(err.to_string(), r#"Unknown CompilerFilter token: "fast""#);
    }

    #[test]
    fn metadata_kind_is_ordered_and_closed() {
        assert_eq!(MetadataKind::ALL.len(), 6);
        for (i, kind) in MetadataKind::ALL.iter().enumerate() {
            assert_eq!(MetadataKind::from_repr(i as u8), Some(*kind));
        }
        assert_eq!(MetadataKind::from_repr(6), None);
    }

    #[test]
    fn metadata_kind_is_a_single_byte() {
        let mut writer = WireWriter::new(Vec::new());
        for kind in MetadataKind::ALL {
            kind.write(&mut writer).unwrap();
        }
        let bytes = writer.into_inner();
        assert_eq!(bytes, [0, 1, 2, 3, 4, 5]);

        let mut reader = WireReader::new(&bytes[..]);
        for kind in MetadataKind::ALL {
            assert_eq!(MetadataKind::read(&mut reader).unwrap(), *kind);
        }

        let err = MetadataKind::read(&mut WireReader::new(&[6u8][..])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(err.to_string(), "Unknown metadata kind: 6");
    }
}
