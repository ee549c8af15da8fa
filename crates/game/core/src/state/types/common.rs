use std::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

catalog_id!(
    /// Stable identifier of a shop listing.
    ShopItemId
);
catalog_id!(
    /// Stable identifier of an equipment piece. Equipment is unique: each id
    /// names one physical item that at most one character can wear.
    EquipmentId
);
catalog_id!(
    /// Stable identifier of a playable character.
    CharacterId
);
catalog_id!(
    /// Stable identifier of a mail message.
    MessageId
);
catalog_id!(
    /// Stable identifier of a gameplay level.
    LevelId
);
