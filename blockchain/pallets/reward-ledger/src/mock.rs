use frame::{
    arithmetic::Perbill,
    deps::{frame_support::weights::constants::RocksDbWeight, frame_system::GenesisConfig},
    prelude::*,
    runtime::prelude::*,
    testing_prelude::*,
};
use polkadot_sdk::pallet_balances;

// Configure a mock runtime to test the pallet.
#[frame_construct_runtime]
mod test_runtime {
    #[runtime::runtime]
    #[runtime::derive(
        RuntimeCall,
        RuntimeEvent,
        RuntimeError,
        RuntimeOrigin,
        RuntimeFreezeReason,
        RuntimeHoldReason,
        RuntimeSlashReason,
        RuntimeLockId,
        RuntimeTask,
        RuntimeViewFunction
    )]
    pub struct Test;

    #[runtime::pallet_index(0)]
    pub type System = frame_system;
    #[runtime::pallet_index(1)]
    pub type RewardLedger = crate;
    #[runtime::pallet_index(2)]
    pub type Balances = pallet_balances;
}

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Nonce = u64;
    type Block = MockBlock<Test>;
    type BlockHashCount = ConstU64<250>;
    type DbWeight = RocksDbWeight;
    type AccountData = pallet_balances::AccountData<u64>;
}

impl pallet_balances::Config for Test {
    type Balance = u64;
    type RuntimeEvent = RuntimeEvent;
    type DustRemoval = ();
    type ExistentialDeposit = ConstU64<1>;
    type AccountStore = System;
    type MaxLocks = ConstU32<50>;
    type MaxReserves = ConstU32<50>;
    type ReserveIdentifier = [u8; 8];
    type WeightInfo = ();
    type RuntimeHoldReason = RuntimeHoldReason;
    type RuntimeFreezeReason = RuntimeFreezeReason;
    type FreezeIdentifier = RuntimeFreezeReason;
    type MaxFreezes = ConstU32<0>;
    type DoneSlashHandler = ();
}

pub struct MockRandomness;
impl
    frame::deps::frame_support::traits::Randomness<
        <Test as frame_system::Config>::Hash,
        BlockNumberFor<Test>,
    > for MockRandomness
{
    fn random(_subject: &[u8]) -> (<Test as frame_system::Config>::Hash, BlockNumberFor<Test>) {
        (Default::default(), 0)
    }
}

frame::deps::frame_support::parameter_types! {
    pub const RewardLedgerPalletId: frame::deps::frame_support::PalletId =
        frame::deps::frame_support::PalletId(*b"rwdledgr");
    pub MarketFee: Perbill = Perbill::from_percent(5);
}

impl crate::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Randomness = MockRandomness;
    type Currency = Balances;
    type AdminOrigin = frame_system::EnsureRoot<u64>;
    type MaxAttributeUris = ConstU32<8>;
    type MaxUriLen = ConstU32<64>;
    type MaxCategoryLen = ConstU32<32>;
    type MaxRewardPoolEntries = ConstU32<16>;
    type MaxOffersPerListing = ConstU32<8>;
    type MaxRewardRanks = ConstU32<8>;
    type MaxParticipants = ConstU32<64>;
    type MarketFee = MarketFee;
    type PalletId = RewardLedgerPalletId;
}

/// The account seeded as minter in the test genesis.
pub const MINTER: u64 = 9;

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> TestState {
    let mut t = GenesisConfig::<Test>::default().build_storage().unwrap();

    // Fund test accounts
    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (1, 10_000),
            (2, 10_000),
            (3, 10_000),
            (4, 10_000),
            (5, 10_000),
            (MINTER, 10_000),
        ],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    // Seed the minter set
    crate::GenesisConfig::<Test> {
        minters: vec![MINTER],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: TestState = t.into();
    ext.execute_with(|| System::set_block_number(1));
    ext
}
