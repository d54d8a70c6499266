use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mirror the `postcard::Error` variants we care about into a `Copy`,
/// serializable error, falling back to `Other` for anything new.
macro_rules! postcard_error {
    ($($variant:ident => $msg:literal),+ $(,)?) => {
        /// Serialization error raised while persisting or restoring the
        /// programming configuration
        #[non_exhaustive]
        #[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum PostcardError {
            $(
                #[error($msg)]
                $variant,
            )+
            #[error("Unclassified postcard error")]
            Other,
        }

        impl From<postcard::Error> for PostcardError {
            fn from(value: postcard::Error) -> Self {
                match value {
                    $(postcard::Error::$variant => Self::$variant,)+
                    _ => Self::Other,
                }
            }
        }
    };
}

postcard_error! {
    SerializeBufferFull => "The buffer is too small for the configuration",
    DeserializeUnexpectedEnd => "The stored configuration ended early",
    DeserializeBadVarint => "The stored configuration has a malformed varint",
    DeserializeBadBool => "The stored configuration has an invalid boolean",
    DeserializeBadOption => "The stored configuration has an invalid option tag",
    DeserializeBadEnum => "The stored configuration has an unknown enum variant",
    DeserializeBadEncoding => "The stored configuration is not well encoded",
    SerdeSerCustom => "Serde serialization error",
    SerdeDeCustom => "Serde deserialization error",
}
