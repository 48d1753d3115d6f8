use crate::pallet::*;
use alloc::vec::Vec;
use frame::prelude::*;
use frame::traits::Randomness;
use reward_core::ItemKind;

impl<T: Config> Pallet<T> {
    /// Derive the pallet's account ID from PalletId. Collects marketplace fees.
    pub(crate) fn pallet_account_id() -> T::AccountId {
        use frame::deps::sp_runtime::traits::AccountIdConversion;
        T::PalletId::get().into_account_truncating()
    }

    /// Generate a unique seed per user/block/context from the environment's
    /// randomness source. The draw consuming it stays pure and replayable.
    pub(crate) fn generate_next_seed(who: &T::AccountId, context: &[u8]) -> u64 {
        let random = T::Randomness::random(context);
        let mut seed_data = Vec::new();
        seed_data.extend_from_slice(&random.0.encode());
        seed_data.extend_from_slice(&who.encode());
        let hash = frame::hashing::blake2_128(&seed_data);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[0..8]);
        u64::from_le_bytes(bytes)
    }

    /// Resolve a signed origin that must be in the minter set.
    pub(crate) fn ensure_minter(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(Minters::<T>::contains_key(&who), Error::<T>::NotMinter);
        Ok(who)
    }

    /// Mint a new item. The only place item ids are assigned.
    ///
    /// Enforces the per-owner achievement category invariant and keeps the
    /// owner index in sync. Used by direct mints, loot box resolution and
    /// tournament payouts.
    pub(crate) fn do_mint(
        owner: &T::AccountId,
        kind: ItemKind,
        rarity: reward_core::Rarity,
        payload: MintPayload<T>,
    ) -> Result<ItemId, DispatchError> {
        let categorized_achievement = kind == ItemKind::Achievement && !payload.category.is_empty();
        if categorized_achievement {
            ensure!(
                !AchievementCategories::<T>::contains_key(owner, &payload.category),
                Error::<T>::AchievementAlreadyGranted
            );
        }

        let item_id = NextItemId::<T>::get();
        let now = frame_system::Pallet::<T>::block_number();

        let item = Item {
            owner: owner.clone(),
            kind,
            rarity,
            level: 0,
            experience: 0,
            power_bonus: payload.power_bonus,
            power_duration: payload.power_duration,
            active_until: None,
            attribute_uris: payload.attribute_uris,
            category: payload.category.clone(),
            minted_at: now,
        };

        Items::<T>::insert(item_id, item);
        OwnedItems::<T>::insert(owner, item_id, ());
        if categorized_achievement {
            AchievementCategories::<T>::insert(owner, &payload.category, ());
        }
        NextItemId::<T>::put(item_id.saturating_add(1));

        Self::deposit_event(Event::ItemMinted {
            item_id,
            owner: owner.clone(),
            kind,
            rarity,
        });

        Ok(item_id)
    }

    /// Move an item between owners. Not exposed as an extrinsic; marketplace
    /// settlement is the only caller.
    ///
    /// Maintains the owner index and carries the achievement category marker
    /// with the item so the per-owner invariant survives trades.
    pub(crate) fn do_transfer(
        item_id: ItemId,
        from: &T::AccountId,
        to: &T::AccountId,
    ) -> DispatchResult {
        let mut item = Items::<T>::get(item_id).ok_or(Error::<T>::ItemNotFound)?;
        ensure!(&item.owner == from, Error::<T>::NotOwner);

        if item.kind == ItemKind::Achievement && !item.category.is_empty() {
            ensure!(
                !AchievementCategories::<T>::contains_key(to, &item.category),
                Error::<T>::AchievementAlreadyGranted
            );
            AchievementCategories::<T>::remove(from, &item.category);
            AchievementCategories::<T>::insert(to, &item.category, ());
        }

        item.owner = to.clone();
        Items::<T>::insert(item_id, item);
        OwnedItems::<T>::remove(from, item_id);
        OwnedItems::<T>::insert(to, item_id, ());

        Self::deposit_event(Event::OwnershipTransferred {
            item_id,
            from: from.clone(),
            to: to.clone(),
        });

        Ok(())
    }

    /// Sum of `power_bonus` over the owner's PowerUp items whose activation
    /// has not expired at `now`. Recomputed on read, never cached; the scan
    /// is bounded by the owner's item count via the `OwnedItems` index.
    pub fn aggregate_bonus(owner: &T::AccountId, now: BlockNumberFor<T>) -> u64 {
        OwnedItems::<T>::iter_prefix(owner)
            .filter_map(|(item_id, ())| Items::<T>::get(item_id))
            .filter(|item| item.kind == ItemKind::PowerUp)
            .filter(|item| matches!(item.active_until, Some(until) if until > now))
            .map(|item| item.power_bonus as u64)
            .sum()
    }

    /// The metadata reference selected by the item's current level, clamped
    /// to the last stage.
    pub fn active_attribute_uri(item: &Item<T>) -> Option<UriOf<T>> {
        if item.attribute_uris.is_empty() {
            return None;
        }
        let index = (item.level as usize).min(item.attribute_uris.len() - 1);
        item.attribute_uris.get(index).cloned()
    }
}
