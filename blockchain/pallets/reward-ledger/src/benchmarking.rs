//! Benchmarking for pallet-reward-ledger.
//!
//! Each dispatchable is measured on its worst bounded path: full attribute
//! lists, full reward pools, full offer vectors and the maximum participant
//! set.

use super::*;
use alloc::vec;
use alloc::vec::Vec;
use frame::deps::sp_runtime::traits::SaturatedConversion;
use frame::{deps::frame_benchmarking::v2::*, prelude::*};

#[benchmarks]
mod benchmarks {
    use super::*;
    use frame::traits::fungible;
    use frame_system::RawOrigin;
    use reward_core::{ItemKind, Rarity};

    fn benchmark_balance<T: Config>() -> BalanceOf<T> {
        1_000_000u128.saturated_into()
    }

    fn fund_account<T: Config>(who: &T::AccountId) {
        let _ = <T::Currency as fungible::Mutate<T::AccountId>>::mint_into(
            who,
            benchmark_balance::<T>(),
        );
    }

    fn max_uri<T: Config>() -> UriOf<T> {
        let len = T::MaxUriLen::get() as usize;
        BoundedVec::try_from(vec![b'u'; len]).expect("uri length is bounded by MaxUriLen")
    }

    fn max_payload<T: Config>(category: &[u8]) -> MintPayload<T> {
        let uris: Vec<_> = (0..T::MaxAttributeUris::get())
            .map(|_| max_uri::<T>())
            .collect();
        MintPayload {
            power_bonus: 100,
            power_duration: 1_000u32.saturated_into(),
            attribute_uris: BoundedVec::try_from(uris)
                .expect("uri count is bounded by MaxAttributeUris"),
            category: BoundedVec::truncate_from(category.to_vec()),
        }
    }

    fn make_minter<T: Config>(who: &T::AccountId) {
        Minters::<T>::insert(who, ());
    }

    fn mint_for<T: Config>(owner: &T::AccountId, kind: ItemKind) -> ItemId {
        let minter: T::AccountId = account("minter", 0, 0);
        make_minter::<T>(&minter);
        let id = NextItemId::<T>::get();
        Pallet::<T>::mint_item(
            RawOrigin::Signed(minter).into(),
            owner.clone(),
            kind,
            Rarity::Rare,
            max_payload::<T>(b""),
        )
        .expect("mint in benchmark setup should succeed");
        id
    }

    fn max_pool_entries<T: Config>() -> BoundedVec<RewardPoolEntry<T>, T::MaxRewardPoolEntries> {
        let entries: Vec<_> = (0..T::MaxRewardPoolEntries::get())
            .map(|_| RewardPoolEntry {
                kind: ItemKind::Special,
                rarity: Rarity::Common,
                weight: 1,
                payload: max_payload::<T>(b""),
            })
            .collect();
        BoundedVec::try_from(entries).expect("entry count is bounded by MaxRewardPoolEntries")
    }

    fn create_max_box<T: Config>() -> BoxId {
        let box_id = NextBoxId::<T>::get();
        Pallet::<T>::create_loot_box(
            RawOrigin::Root.into(),
            Rarity::Common,
            Zero::zero(),
            max_pool_entries::<T>(),
        )
        .expect("loot box creation in benchmark setup should succeed");
        box_id
    }

    /// Complexity: `O(U)`, where `U` is the attribute URI count (`MaxAttributeUris`).
    /// Dominant path: write item record plus owner and category indices.
    #[benchmark]
    fn mint_item() {
        let caller: T::AccountId = whitelisted_caller();
        make_minter::<T>(&caller);
        let owner: T::AccountId = account("owner", 0, 0);
        let id = NextItemId::<T>::get();

        #[extrinsic_call]
        _(
            RawOrigin::Signed(caller),
            owner.clone(),
            ItemKind::Achievement,
            Rarity::Mythic,
            max_payload::<T>(b"bench"),
        );

        assert!(Items::<T>::get(id).is_some());
        assert!(OwnedItems::<T>::contains_key(owner, id));
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn add_minter() {
        let who: T::AccountId = account("minter", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Root, who.clone());

        assert!(Minters::<T>::contains_key(who));
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn remove_minter() {
        let who: T::AccountId = account("minter", 0, 0);
        make_minter::<T>(&who);

        #[extrinsic_call]
        _(RawOrigin::Root, who.clone());

        assert!(!Minters::<T>::contains_key(who));
    }

    /// Complexity: `O(1)`.
    /// Dominant path: threshold recomputation over a multi-level jump.
    #[benchmark]
    fn add_experience() {
        let caller: T::AccountId = whitelisted_caller();
        make_minter::<T>(&caller);
        let id = mint_for::<T>(&caller, ItemKind::Evolution);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), id, 1_000_000u64);

        assert!(Items::<T>::get(id).expect("item exists").level > 0);
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn activate_power_up() {
        let caller: T::AccountId = whitelisted_caller();
        let id = mint_for::<T>(&caller, ItemKind::PowerUp);
        frame_system::Pallet::<T>::set_block_number(1u32.saturated_into());

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), id);

        assert!(Items::<T>::get(id).expect("item exists").active_until.is_some());
    }

    /// Complexity: `O(E)`, where `E` is the pool size (`MaxRewardPoolEntries`).
    /// Dominant path: weight-sum validation over a full pool.
    #[benchmark]
    fn create_loot_box() {
        let box_id = NextBoxId::<T>::get();

        #[extrinsic_call]
        _(
            RawOrigin::Root,
            Rarity::Legendary,
            1_000u32.saturated_into(),
            max_pool_entries::<T>(),
        );

        assert!(LootBoxes::<T>::get(box_id).is_some());
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn grant_eligibility() {
        let owner: T::AccountId = account("owner", 0, 0);
        let box_id = create_max_box::<T>();

        #[extrinsic_call]
        _(RawOrigin::Root, owner.clone(), box_id, 10u32);

        assert_eq!(Eligibility::<T>::get(owner, box_id), 10);
    }

    /// Complexity: `O(E + U)`, where `E` is the pool size and `U` the URI count.
    /// Dominant path: full-pool weighted draw plus the resulting mint.
    #[benchmark]
    fn open_loot_box() {
        let caller: T::AccountId = whitelisted_caller();
        let box_id = create_max_box::<T>();
        Eligibility::<T>::insert(&caller, box_id, 1);
        frame_system::Pallet::<T>::set_block_number(1u32.saturated_into());
        let id = NextItemId::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), box_id);

        assert!(Items::<T>::get(id).is_some());
        assert_eq!(Eligibility::<T>::get(caller, box_id), 0);
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn list_item() {
        let caller: T::AccountId = whitelisted_caller();
        let id = mint_for::<T>(&caller, ItemKind::Special);
        let listing_id = NextListingId::<T>::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), id, benchmark_balance::<T>());

        assert!(Listings::<T>::get(listing_id).is_some());
    }

    /// Complexity: `O(F)`, where `F` is the offer count (`MaxOffersPerListing`).
    /// Dominant path: dropping a full offer vector.
    #[benchmark]
    fn cancel_listing() {
        let caller: T::AccountId = whitelisted_caller();
        let id = mint_for::<T>(&caller, ItemKind::Special);
        Pallet::<T>::list_item(
            RawOrigin::Signed(caller.clone()).into(),
            id,
            benchmark_balance::<T>(),
        )
        .expect("listing in benchmark setup should succeed");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), 0u64);

        assert_eq!(
            Listings::<T>::get(0).expect("listing exists").state,
            ListingState::Cancelled
        );
    }

    /// Complexity: `O(1)`.
    #[benchmark]
    fn update_price() {
        let caller: T::AccountId = whitelisted_caller();
        let id = mint_for::<T>(&caller, ItemKind::Special);
        Pallet::<T>::list_item(
            RawOrigin::Signed(caller.clone()).into(),
            id,
            benchmark_balance::<T>(),
        )
        .expect("listing in benchmark setup should succeed");

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), 0u64, benchmark_balance::<T>());
    }

    /// Complexity: `O(1)` amortized push into a bounded offer vector.
    #[benchmark]
    fn make_offer() {
        let seller: T::AccountId = account("seller", 0, 0);
        let id = mint_for::<T>(&seller, ItemKind::Special);
        Pallet::<T>::list_item(
            RawOrigin::Signed(seller).into(),
            id,
            benchmark_balance::<T>(),
        )
        .expect("listing in benchmark setup should succeed");

        let caller: T::AccountId = whitelisted_caller();
        fund_account::<T>(&caller);

        #[extrinsic_call]
        _(
            RawOrigin::Signed(caller),
            0u64,
            1_000u128.saturated_into(),
            100u32.saturated_into(),
        );

        assert_eq!(Offers::<T>::get(0).len(), 1);
    }

    /// Complexity: `O(F)`, where `F` is the offer count (`MaxOffersPerListing`).
    /// Dominant path: two currency transfers, the registry transfer and the
    /// invalidation of all other offers.
    #[benchmark]
    fn accept_offer() {
        let caller: T::AccountId = whitelisted_caller();
        let id = mint_for::<T>(&caller, ItemKind::Special);
        Pallet::<T>::list_item(
            RawOrigin::Signed(caller.clone()).into(),
            id,
            1_000u128.saturated_into(),
        )
        .expect("listing in benchmark setup should succeed");

        frame_system::Pallet::<T>::set_block_number(1u32.saturated_into());
        for i in 0..T::MaxOffersPerListing::get() {
            let buyer: T::AccountId = account("buyer", i, 0);
            fund_account::<T>(&buyer);
            Pallet::<T>::make_offer(
                RawOrigin::Signed(buyer).into(),
                0u64,
                1_000u128.saturated_into(),
                100u32.saturated_into(),
            )
            .expect("offer in benchmark setup should succeed");
        }

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), 0u64, 0u32);

        assert_eq!(
            Listings::<T>::get(0).expect("listing exists").state,
            ListingState::Sold
        );
    }

    /// Complexity: `O(1)` over ranked box lookups (`MaxRewardRanks`).
    #[benchmark]
    fn configure_event() {
        let box_id = create_max_box::<T>();
        let ranks: Vec<BoxId> = (0..T::MaxRewardRanks::get()).map(|_| box_id).collect();
        let config = EventRewardConfig::<T> {
            rewards_by_rank: BoundedVec::try_from(ranks)
                .expect("rank count is bounded by MaxRewardRanks"),
            participation_box: box_id,
            achievement_rarity: Rarity::Epic,
            achievement_payload: max_payload::<T>(b"bench_event"),
            auto_distribute: false,
        };

        #[extrinsic_call]
        _(RawOrigin::Root, 1u32, config);

        assert!(RewardEvents::<T>::get(1).is_some());
    }

    /// Complexity: `O(P · U)`, where `P` is the participant count
    /// (`MaxParticipants`) and `U` the achievement URI count.
    /// Dominant path: one eligibility grant and one achievement mint per participant.
    #[benchmark]
    fn distribute_rewards() {
        let box_id = create_max_box::<T>();
        let config = EventRewardConfig::<T> {
            rewards_by_rank: BoundedVec::default(),
            participation_box: box_id,
            achievement_rarity: Rarity::Epic,
            achievement_payload: max_payload::<T>(b"bench_event"),
            auto_distribute: false,
        };
        Pallet::<T>::configure_event(RawOrigin::Root.into(), 1u32, config)
            .expect("event configuration in benchmark setup should succeed");

        let participants: Vec<T::AccountId> = (0..T::MaxParticipants::get())
            .map(|i| account("participant", i, 0))
            .collect();
        let ranked = BoundedVec::try_from(participants)
            .expect("participant count is bounded by MaxParticipants");

        #[extrinsic_call]
        _(RawOrigin::Root, 1u32, ranked);

        assert!(DistributedEvents::<T>::get(1));
    }

    impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
