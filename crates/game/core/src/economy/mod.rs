//! Transactional economy over [`PlayerState`].
//!
//! [`EconomyEngine`] is the only writer of the aggregate. Every operation is
//! pure with respect to the state it is handed: it works on a scratch copy,
//! drives the transaction through `pre_validate → apply → post_validate`, and
//! returns the new state only when all three phases pass. On failure the
//! caller's state is untouched by construction.

mod errors;
mod gear;
mod level_up;
mod mail;
mod pricing;
mod purchase;
mod reward;
mod settings;
mod transaction;

pub use errors::{TransactionPhase, TransactionPhaseError};
pub use gear::{AutoEquip, EquipGear, GearError, GearReceipt, UnequipAll, UnequipSlot};
pub use level_up::{LevelUp, LevelUpError, LevelUpReceipt, ResetLevels};
pub use mail::{DeleteMessage, MailError, MarkRead, UndeleteMessage};
pub use pricing::{MAX_DISCOUNT, Price, discounted_price};
pub use purchase::{Purchase, PurchaseError, PurchaseReceipt};
pub use reward::{ClaimError, ClaimReceipt, ClaimReward, ResetFunds};
pub use settings::UpdateSettings;
pub use transaction::{EconomyEnv, Transaction};

use crate::catalog::{Catalog, Reward};
use crate::config::GameConfig;
use crate::state::{CharacterId, EquipmentId, MessageId, PlayerState, Settings, ShopItemId};

/// A transaction that passed every phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed<O> {
    /// The aggregate after the transaction.
    pub state: PlayerState,
    /// Transaction-specific result (receipt).
    pub outcome: O,
}

/// Result type of [`EconomyEngine::execute`] for transaction `T`.
pub type TransactionResult<T> = Result<
    Committed<<T as Transaction>::Output>,
    TransactionPhaseError<<T as Transaction>::Error>,
>;

/// Validates and applies transactions against explicit player state.
///
/// The engine borrows catalog data and configuration; it holds no state of
/// its own, so the same inputs always produce the same outputs.
#[derive(Clone, Copy, Debug)]
pub struct EconomyEngine<'a> {
    env: EconomyEnv<'a>,
}

impl<'a> EconomyEngine<'a> {
    pub fn new(catalog: Catalog<'a>, config: &'a GameConfig) -> Self {
        Self {
            env: EconomyEnv::new(catalog, config),
        }
    }

    pub fn env(&self) -> &EconomyEnv<'a> {
        &self.env
    }

    /// Runs `transaction` on a copy of `state`.
    pub fn execute<T>(&self, transaction: &T, state: &PlayerState) -> TransactionResult<T>
    where
        T: Transaction,
    {
        let mut next = state.clone();
        let outcome = transaction::drive_transaction(transaction, &mut next, &self.env)?;
        Ok(Committed {
            state: next,
            outcome,
        })
    }

    pub fn purchase(&self, item: ShopItemId, state: &PlayerState) -> TransactionResult<Purchase> {
        self.execute(&Purchase::new(item), state)
    }

    pub fn claim_reward(
        &self,
        message: MessageId,
        state: &PlayerState,
    ) -> TransactionResult<ClaimReward> {
        self.execute(&ClaimReward::new(message), state)
    }

    /// Zeroes every currency and consumable. Debug affordance.
    pub fn reset_funds(&self, state: &PlayerState) -> TransactionResult<ResetFunds> {
        self.execute(&ResetFunds, state)
    }

    pub fn spend_level_up_potions(
        &self,
        character: CharacterId,
        state: &PlayerState,
    ) -> TransactionResult<LevelUp> {
        self.execute(&LevelUp::new(character), state)
    }

    /// Sets every character level back to 0. Debug affordance.
    pub fn reset_levels(&self, state: &PlayerState) -> TransactionResult<ResetLevels> {
        self.execute(&ResetLevels, state)
    }

    pub fn equip(
        &self,
        character: CharacterId,
        slot: usize,
        equipment: EquipmentId,
        state: &PlayerState,
    ) -> TransactionResult<EquipGear> {
        self.execute(&EquipGear::new(character, slot, equipment), state)
    }

    pub fn unequip(
        &self,
        character: CharacterId,
        slot: usize,
        state: &PlayerState,
    ) -> TransactionResult<UnequipSlot> {
        self.execute(&UnequipSlot::new(character, slot), state)
    }

    pub fn unequip_all(
        &self,
        character: CharacterId,
        state: &PlayerState,
    ) -> TransactionResult<UnequipAll> {
        self.execute(&UnequipAll::new(character), state)
    }

    pub fn auto_equip(
        &self,
        character: CharacterId,
        state: &PlayerState,
    ) -> TransactionResult<AutoEquip> {
        self.execute(&AutoEquip::new(character), state)
    }

    pub fn mark_read(&self, message: MessageId, state: &PlayerState) -> TransactionResult<MarkRead> {
        self.execute(&MarkRead::new(message), state)
    }

    pub fn delete_message(
        &self,
        message: MessageId,
        state: &PlayerState,
    ) -> TransactionResult<DeleteMessage> {
        self.execute(&DeleteMessage::new(message), state)
    }

    pub fn undelete_message(
        &self,
        message: MessageId,
        state: &PlayerState,
    ) -> TransactionResult<UndeleteMessage> {
        self.execute(&UndeleteMessage::new(message), state)
    }

    pub fn update_settings(
        &self,
        settings: Settings,
        state: &PlayerState,
    ) -> TransactionResult<UpdateSettings> {
        self.execute(&UpdateSettings::new(settings), state)
    }
}

/// Credits `reward` to `state`.
///
/// Returns false when the reward is an equipment piece that is already owned
/// (nothing changes in that case).
fn credit(state: &mut PlayerState, reward: Reward) -> bool {
    match reward {
        Reward::Equipment(id) => state.inventory.insert(id),
        other => {
            if let Some(currency) = other.currency() {
                state.currencies.credit(currency, other.quantity());
            } else if let Some(consumable) = other.consumable() {
                state.consumables.add(consumable, other.quantity());
            }
            true
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small in-memory catalog used by the transaction tests.

    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::catalog::{
        BaseStats, CharacterDefinition, CharacterOracle, EquipmentDefinition, EquipmentOracle,
        EquipmentType, MailOracle, MailTemplate, Rarity, Reward, ShopItemDefinition, ShopOracle,
    };
    use crate::state::{CharacterId, CurrencyKind, EquipmentId, MessageId, ShopItemId};

    #[derive(Default)]
    pub struct Fixture {
        pub shop: BTreeMap<ShopItemId, ShopItemDefinition>,
        pub equipment: BTreeMap<EquipmentId, EquipmentDefinition>,
        pub characters: BTreeMap<CharacterId, CharacterDefinition>,
        pub mail: BTreeMap<MessageId, MailTemplate>,
    }

    impl Fixture {
        pub fn new() -> Self {
            let mut fixture = Self::default();
            fixture.add_item(1, 100, 50, CurrencyKind::Gold, Reward::Gems(10));
            fixture.add_item(2, 100, 0, CurrencyKind::Gold, Reward::HealthPotions(3));
            fixture.add_item(3, 499, 0, CurrencyKind::Usd, Reward::Gold(1000));
            fixture.add_item(4, 20, 0, CurrencyKind::Gems, Reward::Equipment(EquipmentId(5)));

            for (id, kind) in [
                (1, EquipmentType::Weapon),
                (2, EquipmentType::Shield),
                (3, EquipmentType::Helmet),
                (4, EquipmentType::Weapon),
                (5, EquipmentType::Boots),
            ] {
                fixture.equipment.insert(
                    EquipmentId(id),
                    EquipmentDefinition::new(
                        EquipmentId(id),
                        format!("gear {id}"),
                        kind,
                        Rarity::Common,
                    ),
                );
            }

            fixture.characters.insert(
                CharacterId(1),
                CharacterDefinition::new(
                    CharacterId(1),
                    "Knight",
                    Rarity::Common,
                    BaseStats::new(10, 8, 40, 2),
                ),
            );

            let date = |day| NaiveDate::from_ymd_opt(2024, 3, day).unwrap_or_default();
            fixture.mail.insert(
                MessageId(1),
                MailTemplate::new(MessageId(1), "Guild", "Gift", date(1))
                    .with_reward(Reward::Gold(200)),
            );
            fixture.mail.insert(
                MessageId(2),
                MailTemplate::new(MessageId(2), "Guild", "News", date(2)),
            );
            fixture
        }

        pub fn add_item(
            &mut self,
            id: u32,
            cost: u32,
            discount: u32,
            currency: CurrencyKind,
            content: Reward,
        ) {
            self.shop.insert(
                ShopItemId(id),
                ShopItemDefinition::new(
                    ShopItemId(id),
                    format!("item {id}"),
                    cost,
                    discount,
                    currency,
                    content,
                ),
            );
        }

        pub fn catalog(&self) -> crate::catalog::Catalog<'_> {
            crate::catalog::Catalog::empty()
                .with_shop(self)
                .with_equipment(self)
                .with_characters(self)
                .with_mail(self)
        }
    }

    impl ShopOracle for Fixture {
        fn shop_item(&self, id: ShopItemId) -> Option<ShopItemDefinition> {
            self.shop.get(&id).cloned()
        }

        fn all_shop_items(&self) -> Vec<ShopItemDefinition> {
            self.shop.values().cloned().collect()
        }
    }

    impl EquipmentOracle for Fixture {
        fn equipment(&self, id: EquipmentId) -> Option<EquipmentDefinition> {
            self.equipment.get(&id).cloned()
        }

        fn all_equipment(&self) -> Vec<EquipmentDefinition> {
            self.equipment.values().cloned().collect()
        }
    }

    impl CharacterOracle for Fixture {
        fn character(&self, id: CharacterId) -> Option<CharacterDefinition> {
            self.characters.get(&id).cloned()
        }

        fn all_characters(&self) -> Vec<CharacterDefinition> {
            self.characters.values().cloned().collect()
        }
    }

    impl MailOracle for Fixture {
        fn template(&self, id: MessageId) -> Option<MailTemplate> {
            self.mail.get(&id).cloned()
        }

        fn all_templates(&self) -> Vec<MailTemplate> {
            self.mail.values().cloned().collect()
        }
    }
}
