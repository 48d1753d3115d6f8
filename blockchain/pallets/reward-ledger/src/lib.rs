#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;

mod impls;

#[frame::pallet]
pub mod pallet {

    use alloc::vec::Vec;
    use frame::arithmetic::Perbill;
    use frame::prelude::*;
    use frame::traits::{
        fungible,
        tokens::{Fortitude, Preservation},
        Get, Randomness,
    };

    use reward_core::{ItemKind, Rarity};

    #[pallet::pallet]
    pub struct Pallet<T>(_);

    /// Configure the pallet by specifying the parameters and types on which it depends.
    #[pallet::config]
    pub trait Config: frame_system::Config {
        /// Because this pallet emits events, it depends on the runtime's definition of an event.
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Source of randomness for loot box draws. The selection itself is a
        /// pure function of the derived seed; only the seed comes from here.
        type Randomness: Randomness<Self::Hash, BlockNumberFor<Self>>;

        /// Currency for marketplace settlement and fees.
        type Currency: fungible::Inspect<Self::AccountId> + fungible::Mutate<Self::AccountId>;

        /// Origin that may configure loot boxes and reward events, grant
        /// eligibility and manage the minter set (e.g. root or sudo).
        type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

        /// Maximum number of attribute URIs an item can carry (one per stage).
        #[pallet::constant]
        type MaxAttributeUris: Get<u32>;

        /// Maximum byte length of a single attribute URI.
        #[pallet::constant]
        type MaxUriLen: Get<u32>;

        /// Maximum byte length of an achievement category tag.
        #[pallet::constant]
        type MaxCategoryLen: Get<u32>;

        /// Maximum number of entries in a loot box reward pool.
        #[pallet::constant]
        type MaxRewardPoolEntries: Get<u32>;

        /// Maximum number of concurrent offers per listing.
        #[pallet::constant]
        type MaxOffersPerListing: Get<u32>;

        /// Maximum number of explicitly ranked reward tiers per event.
        #[pallet::constant]
        type MaxRewardRanks: Get<u32>;

        /// Maximum number of participants in one reward distribution.
        #[pallet::constant]
        type MaxParticipants: Get<u32>;

        /// Marketplace fee taken from the accepted offer amount.
        #[pallet::constant]
        type MarketFee: Get<Perbill>;

        /// Pallet ID used to derive the account that collects marketplace fees.
        #[pallet::constant]
        type PalletId: Get<frame::deps::frame_support::PalletId>;
    }

    /// Unique, monotonically assigned item identifier.
    pub type ItemId = u64;

    /// Loot box definition identifier.
    pub type BoxId = u32;

    /// Marketplace listing identifier.
    pub type ListingId = u64;

    /// Tournament/event identifier for reward distribution.
    pub type EventId = u32;

    /// Type alias for the balance type from the configured Currency.
    pub type BalanceOf<T> = <<T as Config>::Currency as fungible::Inspect<
        <T as frame_system::Config>::AccountId,
    >>::Balance;

    /// A single opaque metadata reference; content is interpreted off-chain.
    pub type UriOf<T> = BoundedVec<u8, <T as Config>::MaxUriLen>;

    /// Achievement category tag; empty means uncategorized.
    pub type CategoryOf<T> = BoundedVec<u8, <T as Config>::MaxCategoryLen>;

    /// Mutable mint-time data for an item. Which fields are meaningful
    /// depends on the item kind.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
        DefaultNoBound,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct MintPayload<T: Config> {
        /// Bonus granted while a PowerUp is active.
        pub power_bonus: u32,
        /// How long a PowerUp stays active once triggered, in blocks.
        pub power_duration: BlockNumberFor<T>,
        /// Per-stage metadata references; `level` selects the active one.
        pub attribute_uris: BoundedVec<UriOf<T>, T::MaxAttributeUris>,
        /// Achievement category, used for per-owner deduplication.
        pub category: CategoryOf<T>,
    }

    /// A minted item, the central entity of the ledger.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct Item<T: Config> {
        /// Current owner. Changes only through mint and marketplace settlement.
        pub owner: T::AccountId,
        /// Fixed at mint time.
        pub kind: ItemKind,
        /// Fixed at mint time.
        pub rarity: Rarity,
        /// Recomputed from `experience`; meaningful for Evolution items.
        pub level: u32,
        /// Monotonically non-decreasing; meaningful for Evolution items.
        pub experience: u64,
        /// Bonus while active; meaningful for PowerUp items.
        pub power_bonus: u32,
        /// Activation duration in blocks; meaningful for PowerUp items.
        pub power_duration: BlockNumberFor<T>,
        /// Hard expiry of the current activation, if any.
        pub active_until: Option<BlockNumberFor<T>>,
        /// Per-stage metadata references.
        pub attribute_uris: BoundedVec<UriOf<T>, T::MaxAttributeUris>,
        /// Achievement category tag.
        pub category: CategoryOf<T>,
        /// Block at which the item was minted.
        pub minted_at: BlockNumberFor<T>,
    }

    /// Lifecycle state of a marketplace listing.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        Clone,
        Copy,
        PartialEq,
        Eq,
        RuntimeDebug,
        MaxEncodedLen,
    )]
    pub enum ListingState {
        Open,
        Sold,
        Cancelled,
    }

    /// A sell intent for a single item.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct Listing<T: Config> {
        pub item_id: ItemId,
        pub seller: T::AccountId,
        pub ask_price: BalanceOf<T>,
        pub state: ListingState,
    }

    /// A counter-bid against a listing. Settlement uses the offer amount,
    /// which may differ from the listing's ask price.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct Offer<T: Config> {
        pub buyer: T::AccountId,
        pub amount: BalanceOf<T>,
        pub expiry: BlockNumberFor<T>,
    }

    /// One entry of a loot box reward pool.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct RewardPoolEntry<T: Config> {
        pub kind: ItemKind,
        pub rarity: Rarity,
        /// Draw weight; the entry's share of the pool is weight / total.
        pub weight: u32,
        /// Payload applied to the minted item when this entry is drawn.
        pub payload: MintPayload<T>,
    }

    /// A configured loot box: a weighted pool plus a per-owner cooldown.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct LootBoxDefinition<T: Config> {
        pub tier: Rarity,
        /// Minimum number of blocks between two opens by the same owner.
        pub cooldown: BlockNumberFor<T>,
        /// Walked in stored order during the draw; order is part of the contract.
        pub entries: BoundedVec<RewardPoolEntry<T>, T::MaxRewardPoolEntries>,
    }

    /// Reward configuration for a tournament/event payout.
    #[derive(
        Encode,
        Decode,
        DecodeWithMemTracking,
        TypeInfo,
        CloneNoBound,
        PartialEqNoBound,
        RuntimeDebugNoBound,
        MaxEncodedLen,
    )]
    #[scale_info(skip_type_params(T))]
    pub struct EventRewardConfig<T: Config> {
        /// Box granted to rank r (0-based). Participants past the end of this
        /// list receive the participation box instead.
        pub rewards_by_rank: BoundedVec<BoxId, T::MaxRewardRanks>,
        /// Fallback box for unranked participants.
        pub participation_box: BoxId,
        /// Rarity of the achievement minted per participant.
        pub achievement_rarity: Rarity,
        /// Payload (category, URIs) of the achievement minted per participant.
        pub achievement_payload: MintPayload<T>,
        /// When set, any signed origin may trigger distribution.
        pub auto_distribute: bool,
    }

    /// Item table keyed by id. The single authoritative ownership record.
    #[pallet::storage]
    pub type Items<T: Config> = StorageMap<_, Blake2_128Concat, ItemId, Item<T>, OptionQuery>;

    /// Next available item id.
    #[pallet::storage]
    pub type NextItemId<T: Config> = StorageValue<_, ItemId, ValueQuery>;

    /// Index of items by owner. Keeps per-owner scans (aggregate bonus)
    /// bounded by owned-item count rather than global item count.
    #[pallet::storage]
    pub type OwnedItems<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        ItemId,
        (),
        OptionQuery,
    >;

    /// Achievement categories held per owner; guards duplicate grants.
    #[pallet::storage]
    pub type AchievementCategories<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        CategoryOf<T>,
        (),
        OptionQuery,
    >;

    /// Accounts allowed to call mint-class operations.
    #[pallet::storage]
    pub type Minters<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

    /// Marketplace listings keyed by listing id. Sold and cancelled listings
    /// are kept for historical reads.
    #[pallet::storage]
    pub type Listings<T: Config> =
        StorageMap<_, Blake2_128Concat, ListingId, Listing<T>, OptionQuery>;

    /// Next available listing id.
    #[pallet::storage]
    pub type NextListingId<T: Config> = StorageValue<_, ListingId, ValueQuery>;

    /// The at-most-one Open listing per item.
    #[pallet::storage]
    pub type ListingByItem<T: Config> =
        StorageMap<_, Blake2_128Concat, ItemId, ListingId, OptionQuery>;

    /// Offers per listing; the offer index is the position in this vector.
    #[pallet::storage]
    pub type Offers<T: Config> = StorageMap<
        _,
        Blake2_128Concat,
        ListingId,
        BoundedVec<Offer<T>, T::MaxOffersPerListing>,
        ValueQuery,
    >;

    /// Loot box definitions keyed by box id.
    #[pallet::storage]
    pub type LootBoxes<T: Config> =
        StorageMap<_, Blake2_128Concat, BoxId, LootBoxDefinition<T>, OptionQuery>;

    /// Next available loot box id.
    #[pallet::storage]
    pub type NextBoxId<T: Config> = StorageValue<_, BoxId, ValueQuery>;

    /// Consumable open permissions per (owner, box).
    #[pallet::storage]
    pub type Eligibility<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        BoxId,
        u32,
        ValueQuery,
    >;

    /// Block of the last successful open per (owner, box).
    #[pallet::storage]
    pub type LastOpened<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        BoxId,
        BlockNumberFor<T>,
        OptionQuery,
    >;

    /// Reward configuration per event.
    #[pallet::storage]
    pub type RewardEvents<T: Config> =
        StorageMap<_, Blake2_128Concat, EventId, EventRewardConfig<T>, OptionQuery>;

    /// Idempotency marker: whether an event's rewards have been distributed.
    #[pallet::storage]
    pub type DistributedEvents<T: Config> =
        StorageMap<_, Blake2_128Concat, EventId, bool, ValueQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// A new item has been minted.
        ItemMinted {
            item_id: ItemId,
            owner: T::AccountId,
            kind: ItemKind,
            rarity: Rarity,
        },
        /// An item changed hands.
        OwnershipTransferred {
            item_id: ItemId,
            from: T::AccountId,
            to: T::AccountId,
        },
        /// An account was added to the minter set.
        MinterAdded { who: T::AccountId },
        /// An account was removed from the minter set.
        MinterRemoved { who: T::AccountId },
        /// Experience was added to an Evolution item.
        ExperienceAdded {
            item_id: ItemId,
            amount: u64,
            experience: u64,
            level: u32,
        },
        /// An Evolution item crossed one or more level thresholds.
        ItemEvolved {
            item_id: ItemId,
            old_level: u32,
            new_level: u32,
        },
        /// A PowerUp was activated.
        PowerUpActivated {
            item_id: ItemId,
            owner: T::AccountId,
            active_until: BlockNumberFor<T>,
        },
        /// A loot box definition was created.
        LootBoxCreated { box_id: BoxId, tier: Rarity },
        /// Open permissions were granted.
        EligibilityGranted {
            owner: T::AccountId,
            box_id: BoxId,
            count: u32,
        },
        /// A loot box was opened and its reward minted.
        LootBoxOpened {
            box_id: BoxId,
            owner: T::AccountId,
            item_id: ItemId,
            entry_index: u32,
            seed: u64,
        },
        /// An item was listed for sale.
        ItemListed {
            listing_id: ListingId,
            item_id: ItemId,
            seller: T::AccountId,
            ask_price: BalanceOf<T>,
        },
        /// A listing was cancelled by its seller.
        ListingCancelled { listing_id: ListingId },
        /// A listing's ask price was changed.
        ListingPriceUpdated {
            listing_id: ListingId,
            new_price: BalanceOf<T>,
        },
        /// A buyer made an offer against a listing.
        OfferMade {
            listing_id: ListingId,
            offer_index: u32,
            buyer: T::AccountId,
            amount: BalanceOf<T>,
            expiry: BlockNumberFor<T>,
        },
        /// An offer was accepted and the exchange settled atomically.
        OfferAccepted {
            listing_id: ListingId,
            item_id: ItemId,
            seller: T::AccountId,
            buyer: T::AccountId,
            amount: BalanceOf<T>,
            fee: BalanceOf<T>,
        },
        /// A reward event was configured.
        EventConfigured { event_id: EventId },
        /// Rewards for an event were distributed.
        RewardsDistributed {
            event_id: EventId,
            participants: u32,
        },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The referenced item does not exist.
        ItemNotFound,
        /// The referenced listing does not exist.
        ListingNotFound,
        /// The referenced offer index does not exist for this listing.
        OfferNotFound,
        /// The referenced loot box does not exist.
        BoxNotFound,
        /// The referenced reward event has not been configured.
        UnknownEvent,
        /// Caller does not own the item.
        NotOwner,
        /// Caller is not the seller of the listing.
        NotSeller,
        /// Caller is not in the minter set.
        NotMinter,
        /// Operation applied to an incompatible item kind.
        WrongItemKind,
        /// The PowerUp is already active.
        AlreadyActive,
        /// The per-owner cooldown for this box has not elapsed.
        CooldownActive,
        /// No eligibility grants remain for this owner and box.
        NotEligible,
        /// The seller no longer owns the listed item.
        StaleOwnership,
        /// The listing is not in the Open state.
        ListingNotOpen,
        /// The chosen offer has expired.
        OfferExpired,
        /// The reward pool's total weight is zero.
        EmptyRewardPool,
        /// The reward pool's total weight overflows the draw denominator.
        WeightOverflow,
        /// The buyer cannot cover the offered amount.
        InsufficientFunds,
        /// Rewards for this event have already been distributed.
        AlreadyDistributed,
        /// The owner already holds an achievement of this category.
        AchievementAlreadyGranted,
        /// Experience grants must be positive.
        ZeroExperience,
        /// An Open listing already exists for this item.
        ListingAlreadyExists,
        /// The listing has reached its offer capacity.
        TooManyOffers,
        /// A buyer cannot bid on their own listing.
        CannotOfferOnOwnListing,
    }

    #[pallet::genesis_config]
    #[derive(frame::prelude::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Accounts seeded into the minter set at genesis.
        pub minters: Vec<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            for who in &self.minters {
                Minters::<T>::insert(who, ());
            }
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Mint a new item for `owner`. Minter-gated.
        ///
        /// Assigns the next id and freezes kind and rarity. Achievement mints
        /// with a non-empty category are deduplicated per owner.
        #[pallet::call_index(0)]
        #[pallet::weight(Weight::default())]
        pub fn mint_item(
            origin: OriginFor<T>,
            owner: T::AccountId,
            kind: ItemKind,
            rarity: Rarity,
            payload: MintPayload<T>,
        ) -> DispatchResult {
            Self::ensure_minter(origin)?;
            Self::do_mint(&owner, kind, rarity, payload)?;
            Ok(())
        }

        /// Add an account to the minter set. Admin-only.
        #[pallet::call_index(1)]
        #[pallet::weight(Weight::default())]
        pub fn add_minter(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Minters::<T>::insert(&who, ());
            Self::deposit_event(Event::MinterAdded { who });
            Ok(())
        }

        /// Remove an account from the minter set. Admin-only.
        #[pallet::call_index(2)]
        #[pallet::weight(Weight::default())]
        pub fn remove_minter(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            Minters::<T>::remove(&who);
            Self::deposit_event(Event::MinterRemoved { who });
            Ok(())
        }

        /// Add experience to an Evolution item. Minter-gated: experience is
        /// earned through gameplay that the game backend reports.
        ///
        /// Level-ups are an automatic side effect of crossing a threshold; a
        /// single grant may advance multiple levels.
        #[pallet::call_index(3)]
        #[pallet::weight(Weight::default())]
        pub fn add_experience(
            origin: OriginFor<T>,
            item_id: ItemId,
            amount: u64,
        ) -> DispatchResult {
            Self::ensure_minter(origin)?;
            ensure!(amount > 0, Error::<T>::ZeroExperience);

            let mut item = Items::<T>::get(item_id).ok_or(Error::<T>::ItemNotFound)?;
            ensure!(item.kind == ItemKind::Evolution, Error::<T>::WrongItemKind);

            item.experience = item.experience.saturating_add(amount);
            let new_level = reward_core::level_for_experience(item.experience);

            let old_level = item.level;
            if new_level > old_level {
                item.level = new_level;
            }

            let experience = item.experience;
            let level = item.level;
            Items::<T>::insert(item_id, item);

            if new_level > old_level {
                Self::deposit_event(Event::ItemEvolved {
                    item_id,
                    old_level,
                    new_level,
                });
            }
            Self::deposit_event(Event::ExperienceAdded {
                item_id,
                amount,
                experience,
                level,
            });

            Ok(())
        }

        /// Activate a PowerUp. Owner-gated; rejected while a previous
        /// activation is still running.
        #[pallet::call_index(4)]
        #[pallet::weight(Weight::default())]
        pub fn activate_power_up(origin: OriginFor<T>, item_id: ItemId) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut item = Items::<T>::get(item_id).ok_or(Error::<T>::ItemNotFound)?;
            ensure!(item.owner == who, Error::<T>::NotOwner);
            ensure!(item.kind == ItemKind::PowerUp, Error::<T>::WrongItemKind);

            let now = frame_system::Pallet::<T>::block_number();
            if let Some(until) = item.active_until {
                ensure!(until <= now, Error::<T>::AlreadyActive);
            }

            let active_until = now.saturating_add(item.power_duration);
            item.active_until = Some(active_until);
            Items::<T>::insert(item_id, item);

            Self::deposit_event(Event::PowerUpActivated {
                item_id,
                owner: who,
                active_until,
            });

            Ok(())
        }

        /// Create a loot box definition. Admin-only.
        ///
        /// A pool whose total weight is zero is a configuration mistake and is
        /// rejected here, not deferred to open time.
        #[pallet::call_index(5)]
        #[pallet::weight(Weight::default())]
        pub fn create_loot_box(
            origin: OriginFor<T>,
            tier: Rarity,
            cooldown: BlockNumberFor<T>,
            entries: BoundedVec<RewardPoolEntry<T>, T::MaxRewardPoolEntries>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;

            let mut total: u64 = 0;
            for entry in &entries {
                total = total
                    .checked_add(entry.weight as u64)
                    .ok_or(Error::<T>::WeightOverflow)?;
            }
            ensure!(total > 0, Error::<T>::EmptyRewardPool);

            let box_id = NextBoxId::<T>::get();
            LootBoxes::<T>::insert(
                box_id,
                LootBoxDefinition {
                    tier,
                    cooldown,
                    entries,
                },
            );
            NextBoxId::<T>::put(box_id.saturating_add(1));

            Self::deposit_event(Event::LootBoxCreated { box_id, tier });

            Ok(())
        }

        /// Grant `count` open permissions for a box to `owner`. Admin-only.
        #[pallet::call_index(6)]
        #[pallet::weight(Weight::default())]
        pub fn grant_eligibility(
            origin: OriginFor<T>,
            owner: T::AccountId,
            box_id: BoxId,
            count: u32,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;
            ensure!(LootBoxes::<T>::contains_key(box_id), Error::<T>::BoxNotFound);

            Eligibility::<T>::mutate(&owner, box_id, |c| *c = c.saturating_add(count));

            Self::deposit_event(Event::EligibilityGranted {
                owner,
                box_id,
                count,
            });

            Ok(())
        }

        /// Open a loot box: consume one eligibility grant, enforce the
        /// cooldown, resolve the weighted draw and mint the result.
        #[pallet::call_index(7)]
        #[pallet::weight(Weight::default())]
        pub fn open_loot_box(origin: OriginFor<T>, box_id: BoxId) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let definition = LootBoxes::<T>::get(box_id).ok_or(Error::<T>::BoxNotFound)?;

            ensure!(Eligibility::<T>::get(&who, box_id) > 0, Error::<T>::NotEligible);

            let now = frame_system::Pallet::<T>::block_number();
            if let Some(last) = LastOpened::<T>::get(&who, box_id) {
                ensure!(
                    now >= last.saturating_add(definition.cooldown),
                    Error::<T>::CooldownActive
                );
            }

            // Validation done; consume the grant and stamp the cooldown before
            // resolving the draw.
            Eligibility::<T>::mutate(&who, box_id, |c| *c = c.saturating_sub(1));
            LastOpened::<T>::insert(&who, box_id, now);

            let seed = Self::generate_next_seed(&who, b"open_loot_box");
            let weights: Vec<u32> = definition.entries.iter().map(|e| e.weight).collect();
            let entry_index =
                reward_core::draw_index(&weights, seed).ok_or(Error::<T>::EmptyRewardPool)?;
            let entry = &definition.entries[entry_index];

            let item_id = Self::do_mint(&who, entry.kind, entry.rarity, entry.payload.clone())?;

            Self::deposit_event(Event::LootBoxOpened {
                box_id,
                owner: who,
                item_id,
                entry_index: entry_index as u32,
                seed,
            });

            Ok(())
        }

        /// List an item for sale. Caller must own it and it must not already
        /// have an Open listing.
        #[pallet::call_index(8)]
        #[pallet::weight(Weight::default())]
        pub fn list_item(
            origin: OriginFor<T>,
            item_id: ItemId,
            ask_price: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let item = Items::<T>::get(item_id).ok_or(Error::<T>::ItemNotFound)?;
            ensure!(item.owner == who, Error::<T>::NotOwner);
            ensure!(
                !ListingByItem::<T>::contains_key(item_id),
                Error::<T>::ListingAlreadyExists
            );

            let listing_id = NextListingId::<T>::get();
            Listings::<T>::insert(
                listing_id,
                Listing {
                    item_id,
                    seller: who.clone(),
                    ask_price,
                    state: ListingState::Open,
                },
            );
            ListingByItem::<T>::insert(item_id, listing_id);
            NextListingId::<T>::put(listing_id.saturating_add(1));

            Self::deposit_event(Event::ItemListed {
                listing_id,
                item_id,
                seller: who,
                ask_price,
            });

            Ok(())
        }

        /// Cancel an Open listing. Seller-only. Drops all offers against it.
        #[pallet::call_index(9)]
        #[pallet::weight(Weight::default())]
        pub fn cancel_listing(origin: OriginFor<T>, listing_id: ListingId) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.state == ListingState::Open, Error::<T>::ListingNotOpen);
            ensure!(listing.seller == who, Error::<T>::NotSeller);

            listing.state = ListingState::Cancelled;
            ListingByItem::<T>::remove(listing.item_id);
            Listings::<T>::insert(listing_id, listing);
            Offers::<T>::remove(listing_id);

            Self::deposit_event(Event::ListingCancelled { listing_id });

            Ok(())
        }

        /// Change the ask price of an Open listing. Seller-only.
        #[pallet::call_index(10)]
        #[pallet::weight(Weight::default())]
        pub fn update_price(
            origin: OriginFor<T>,
            listing_id: ListingId,
            new_price: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.state == ListingState::Open, Error::<T>::ListingNotOpen);
            ensure!(listing.seller == who, Error::<T>::NotSeller);

            listing.ask_price = new_price;
            Listings::<T>::insert(listing_id, listing);

            Self::deposit_event(Event::ListingPriceUpdated {
                listing_id,
                new_price,
            });

            Ok(())
        }

        /// Make an offer against an Open listing. The buyer must be able to
        /// cover the amount now; settlement re-checks at accept time.
        ///
        /// Offer indices are stable slots. When the list is full, the slot of
        /// an expired offer is reused; `TooManyOffers` only when every slot
        /// holds a live offer.
        #[pallet::call_index(11)]
        #[pallet::weight(Weight::default())]
        pub fn make_offer(
            origin: OriginFor<T>,
            listing_id: ListingId,
            amount: BalanceOf<T>,
            duration: BlockNumberFor<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.state == ListingState::Open, Error::<T>::ListingNotOpen);
            ensure!(listing.seller != who, Error::<T>::CannotOfferOnOwnListing);

            let free = <T::Currency as fungible::Inspect<T::AccountId>>::reducible_balance(
                &who,
                Preservation::Expendable,
                Fortitude::Polite,
            );
            ensure!(free >= amount, Error::<T>::InsufficientFunds);

            let now = frame_system::Pallet::<T>::block_number();
            let expiry = now.saturating_add(duration);

            let offer_index = Offers::<T>::try_mutate(listing_id, |offers| {
                let offer = Offer {
                    buyer: who.clone(),
                    amount,
                    expiry,
                };
                match offers.try_push(offer) {
                    Ok(()) => Ok::<u32, Error<T>>(offers.len() as u32 - 1),
                    Err(offer) => {
                        // Full list: reclaim the slot of an expired offer.
                        let slot = offers
                            .iter()
                            .position(|o| o.expiry <= now)
                            .ok_or(Error::<T>::TooManyOffers)?;
                        offers[slot] = offer;
                        Ok(slot as u32)
                    }
                }
            })?;

            Self::deposit_event(Event::OfferMade {
                listing_id,
                offer_index,
                buyer: who,
                amount,
                expiry,
            });

            Ok(())
        }

        /// Accept an offer and settle atomically: payment minus fee moves from
        /// buyer to seller, the item moves from seller to buyer, the listing
        /// becomes Sold and all other offers are invalidated.
        ///
        /// Any failing leg aborts the whole extrinsic; transactional dispatch
        /// guarantees no partial effect.
        #[pallet::call_index(12)]
        #[pallet::weight(Weight::default())]
        pub fn accept_offer(
            origin: OriginFor<T>,
            listing_id: ListingId,
            offer_index: u32,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;

            let mut listing = Listings::<T>::get(listing_id).ok_or(Error::<T>::ListingNotFound)?;
            ensure!(listing.state == ListingState::Open, Error::<T>::ListingNotOpen);
            ensure!(listing.seller == who, Error::<T>::NotSeller);

            let offers = Offers::<T>::get(listing_id);
            let offer = offers
                .get(offer_index as usize)
                .cloned()
                .ok_or(Error::<T>::OfferNotFound)?;

            let now = frame_system::Pallet::<T>::block_number();
            ensure!(offer.expiry > now, Error::<T>::OfferExpired);

            let item = Items::<T>::get(listing.item_id).ok_or(Error::<T>::ItemNotFound)?;
            ensure!(item.owner == who, Error::<T>::StaleOwnership);

            let free = <T::Currency as fungible::Inspect<T::AccountId>>::reducible_balance(
                &offer.buyer,
                Preservation::Expendable,
                Fortitude::Polite,
            );
            ensure!(free >= offer.amount, Error::<T>::InsufficientFunds);

            let fee = T::MarketFee::get().mul_floor(offer.amount);
            let proceeds = offer.amount.saturating_sub(fee);

            <T::Currency as fungible::Mutate<T::AccountId>>::transfer(
                &offer.buyer,
                &who,
                proceeds,
                Preservation::Expendable,
            )?;
            if !fee.is_zero() {
                <T::Currency as fungible::Mutate<T::AccountId>>::transfer(
                    &offer.buyer,
                    &Self::pallet_account_id(),
                    fee,
                    Preservation::Expendable,
                )?;
            }

            Self::do_transfer(listing.item_id, &who, &offer.buyer)?;

            listing.state = ListingState::Sold;
            ListingByItem::<T>::remove(listing.item_id);
            let item_id = listing.item_id;
            Listings::<T>::insert(listing_id, listing);
            Offers::<T>::remove(listing_id);

            Self::deposit_event(Event::OfferAccepted {
                listing_id,
                item_id,
                seller: who,
                buyer: offer.buyer,
                amount: offer.amount,
                fee,
            });

            Ok(())
        }

        /// Configure (or overwrite) the reward setup for an event. Admin-only.
        /// A distributed event's configuration is frozen.
        #[pallet::call_index(13)]
        #[pallet::weight(Weight::default())]
        pub fn configure_event(
            origin: OriginFor<T>,
            event_id: EventId,
            config: EventRewardConfig<T>,
        ) -> DispatchResult {
            T::AdminOrigin::ensure_origin(origin)?;

            ensure!(
                !DistributedEvents::<T>::get(event_id),
                Error::<T>::AlreadyDistributed
            );
            for box_id in config.rewards_by_rank.iter() {
                ensure!(LootBoxes::<T>::contains_key(box_id), Error::<T>::BoxNotFound);
            }
            ensure!(
                LootBoxes::<T>::contains_key(config.participation_box),
                Error::<T>::BoxNotFound
            );

            RewardEvents::<T>::insert(event_id, config);

            Self::deposit_event(Event::EventConfigured { event_id });

            Ok(())
        }

        /// Distribute rewards for an event: per participant, grant loot box
        /// eligibility for their rank and mint the event achievement unless
        /// already held. Idempotent per event id.
        ///
        /// Admin-only unless the event was configured with `auto_distribute`,
        /// in which case any signed origin may trigger it.
        #[pallet::call_index(14)]
        #[pallet::weight(Weight::default())]
        pub fn distribute_rewards(
            origin: OriginFor<T>,
            event_id: EventId,
            ranked_participants: BoundedVec<T::AccountId, T::MaxParticipants>,
        ) -> DispatchResult {
            let config = RewardEvents::<T>::get(event_id).ok_or(Error::<T>::UnknownEvent)?;

            if config.auto_distribute {
                ensure_signed(origin)?;
            } else {
                T::AdminOrigin::ensure_origin(origin)?;
            }

            ensure!(
                !DistributedEvents::<T>::get(event_id),
                Error::<T>::AlreadyDistributed
            );

            for (rank, participant) in ranked_participants.iter().enumerate() {
                let box_id = config
                    .rewards_by_rank
                    .get(rank)
                    .copied()
                    .unwrap_or(config.participation_box);
                Eligibility::<T>::mutate(participant, box_id, |c| *c = c.saturating_add(1));

                let category = &config.achievement_payload.category;
                let already_held = !category.is_empty()
                    && AchievementCategories::<T>::contains_key(participant, category);
                if !already_held {
                    Self::do_mint(
                        participant,
                        ItemKind::Achievement,
                        config.achievement_rarity,
                        config.achievement_payload.clone(),
                    )?;
                }
            }

            DistributedEvents::<T>::insert(event_id, true);

            Self::deposit_event(Event::RewardsDistributed {
                event_id,
                participants: ranked_participants.len() as u32,
            });

            Ok(())
        }
    }
}
