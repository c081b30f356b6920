//! Integration tests for the custody contract.
//!
//! Each scenario deploys a fresh contract against the well-known ORBS and
//! USDC ledgers, funds the custody address the way an outside holder would
//! (a transfer from a funded "hot wallet"), and checks balances on both
//! sides after every owner-gated call.

use nexus_contracts::{Custody, CustodyError, Sweep};
use nexus_protocol::ledger::{token, LedgerError, LedgerHost, LedgerRegistry, TokenInfo};
use nexus_protocol::{Address, Amount, AssetId};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn deployer() -> Address {
    Address::from_low_u64(0xde9)
}

fn non_owner() -> Address {
    Address::from_low_u64(0x1)
}

fn new_owner() -> Address {
    Address::from_low_u64(0x2)
}

fn hot_wallet() -> Address {
    Address::from_low_u64(0x407)
}

fn whole(info: &TokenInfo, n: u128) -> Amount {
    info.units(n).expect("fixture amount fits in u128")
}

/// Deploys custody owned by `deployer()` and gives the hot wallet a large
/// balance of every well-known token.
fn deploy() -> (Custody, LedgerRegistry) {
    let custody = Custody::new(deployer()).unwrap();
    let mut host = LedgerRegistry::with_well_known();
    for info in [token::orbs(), token::usdc()] {
        host.mint(&info.address, &hot_wallet(), whole(&info, 1_000_000))
            .unwrap();
    }
    (custody, host)
}

/// Moves `n` whole tokens from the hot wallet into custody.
fn fund(custody: &Custody, host: &mut LedgerRegistry, info: &TokenInfo, n: u128) {
    host.transfer(
        &info.address,
        &hot_wallet(),
        &custody.custody_address(),
        whole(info, n),
    )
    .unwrap();
}

fn balance(host: &LedgerRegistry, info: &TokenInfo, holder: &Address) -> Amount {
    host.balance_of(&info.address, holder).unwrap()
}

/// A host whose ledger for `frozen` answers balance queries but refuses
/// every outbound transfer, the way a blacklisting token would.
struct FreezingHost {
    inner: LedgerRegistry,
    frozen: AssetId,
}

impl LedgerHost for FreezingHost {
    type Checkpoint = <LedgerRegistry as LedgerHost>::Checkpoint;

    fn balance_of(&self, asset: &AssetId, holder: &Address) -> Result<Amount, LedgerError> {
        self.inner.balance_of(asset, holder)
    }

    fn transfer(
        &mut self,
        asset: &AssetId,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if *asset == self.frozen {
            return Err(LedgerError::Rejected("holder is frozen".into()));
        }
        self.inner.transfer(asset, from, to, amount)
    }

    fn checkpoint(&self) -> Self::Checkpoint {
        self.inner.checkpoint()
    }

    fn revert(&mut self, checkpoint: Self::Checkpoint) {
        self.inner.revert(checkpoint);
    }
}

// ---------------------------------------------------------------------------
// Owner Withdrawals
// ---------------------------------------------------------------------------

#[test]
fn owner_transfers_given_amount_of_reserve() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);

    custody
        .transfer_primary_reserve(&mut host, &deployer(), whole(&orbs, 1))
        .unwrap();

    assert_eq!(
        balance(&host, &orbs, &custody.custody_address()),
        whole(&orbs, 99)
    );
    assert_eq!(balance(&host, &orbs, &deployer()), whole(&orbs, 1));
}

#[test]
fn owner_transfers_total_reserve_with_zero_amount() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);
    let before = balance(&host, &orbs, &deployer());

    custody
        .transfer_primary_reserve(&mut host, &deployer(), 0)
        .unwrap();

    assert_eq!(balance(&host, &orbs, &custody.custody_address()), 0);
    assert_eq!(
        balance(&host, &orbs, &deployer()) - before,
        whole(&orbs, 100)
    );
}

#[test]
fn partial_then_full_sweep_totals_the_deposit() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);

    let first = custody
        .transfer_primary_reserve(&mut host, &deployer(), whole(&orbs, 1))
        .unwrap();
    let rest = custody
        .transfer_primary_reserve(&mut host, &deployer(), 0)
        .unwrap();

    assert_eq!(first, whole(&orbs, 1));
    assert_eq!(rest, whole(&orbs, 99));
    assert_eq!(balance(&host, &orbs, &custody.custody_address()), 0);
    assert_eq!(balance(&host, &orbs, &deployer()), whole(&orbs, 100));
}

#[test]
fn owner_transfers_total_of_arbitrary_asset() {
    let usdc = token::usdc();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 100);
    let before = balance(&host, &usdc, &deployer());

    custody
        .transfer_asset(&mut host, &deployer(), &usdc.address, 0)
        .unwrap();

    assert_eq!(balance(&host, &usdc, &custody.custody_address()), 0);
    assert_eq!(
        balance(&host, &usdc, &deployer()) - before,
        whole(&usdc, 100)
    );
}

#[test]
fn withdrawing_more_than_held_fails_and_changes_nothing() {
    let usdc = token::usdc();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 5);
    let before = host.clone();

    let err = custody
        .transfer_asset(&mut host, &deployer(), &usdc.address, whole(&usdc, 6))
        .unwrap_err();

    assert!(matches!(err, CustodyError::TransferFailed { .. }));
    assert_eq!(host, before);
}

// ---------------------------------------------------------------------------
// Non-owner Rejection
// ---------------------------------------------------------------------------

#[test]
fn non_owner_cannot_transfer_asset() {
    let usdc = token::usdc();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 100);

    let err = custody
        .transfer_asset(&mut host, &non_owner(), &usdc.address, 0)
        .unwrap_err();

    assert!(err.to_string().contains("caller is not the owner"));
    assert_eq!(
        balance(&host, &usdc, &custody.custody_address()),
        whole(&usdc, 100)
    );
}

#[test]
fn non_owner_cannot_transfer_reserve() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);

    let err = custody
        .transfer_primary_reserve(&mut host, &non_owner(), 0)
        .unwrap_err();

    assert!(err.to_string().contains("caller is not the owner"));
    assert_eq!(balance(&host, &orbs, &non_owner()), 0);
}

#[test]
fn non_owner_cannot_rescue() {
    let (orbs, usdc) = (token::orbs(), token::usdc());
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 100);
    fund(&custody, &mut host, &orbs, 100);
    let before = host.clone();

    let err = custody
        .rescue_assets(&mut host, &non_owner(), &[usdc.address, orbs.address])
        .unwrap_err();

    assert!(err.to_string().contains("caller is not the owner"));
    assert_eq!(host, before);
}

#[test]
fn non_owner_cannot_transfer_ownership() {
    let (mut custody, _host) = deploy();

    let err = custody
        .transfer_ownership(&non_owner(), non_owner())
        .unwrap_err();

    assert!(err.to_string().contains("caller is not the owner"));
    assert_eq!(custody.owner(), deployer());
}

// ---------------------------------------------------------------------------
// Batch Rescue
// ---------------------------------------------------------------------------

#[test]
fn owner_rescues_list_of_tokens() {
    let (orbs, usdc) = (token::orbs(), token::usdc());
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 100);
    fund(&custody, &mut host, &orbs, 100);
    let usdc_before = balance(&host, &usdc, &deployer());
    let orbs_before = balance(&host, &orbs, &deployer());

    let sweeps = custody
        .rescue_assets(&mut host, &deployer(), &[usdc.address, orbs.address])
        .unwrap();

    assert_eq!(
        sweeps,
        vec![
            Sweep {
                asset: usdc.address,
                amount: whole(&usdc, 100)
            },
            Sweep {
                asset: orbs.address,
                amount: whole(&orbs, 100)
            },
        ]
    );
    assert_eq!(balance(&host, &usdc, &custody.custody_address()), 0);
    assert_eq!(balance(&host, &orbs, &custody.custody_address()), 0);
    assert_eq!(
        balance(&host, &usdc, &deployer()) - usdc_before,
        whole(&usdc, 100)
    );
    assert_eq!(
        balance(&host, &orbs, &deployer()) - orbs_before,
        whole(&orbs, 100)
    );
}

#[test]
fn rescue_order_does_not_change_outcome() {
    let (orbs, usdc) = (token::orbs(), token::usdc());
    let (mut a, mut host_a) = deploy();
    let (mut b, mut host_b) = deploy();
    for (custody, host) in [(&a, &mut host_a), (&b, &mut host_b)] {
        fund(custody, host, &usdc, 7);
        fund(custody, host, &orbs, 3);
    }

    a.rescue_assets(&mut host_a, &deployer(), &[usdc.address, orbs.address])
        .unwrap();
    b.rescue_assets(&mut host_b, &deployer(), &[orbs.address, usdc.address])
        .unwrap();

    assert_eq!(host_a, host_b);
}

#[test]
fn rescue_with_unregistered_asset_reverts_whole_batch() {
    let (orbs, usdc) = (token::orbs(), token::usdc());
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 100);
    fund(&custody, &mut host, &orbs, 100);
    let before = host.clone();
    let unknown = Address::from_low_u64(0xfeed);

    let err = custody
        .rescue_assets(
            &mut host,
            &deployer(),
            &[usdc.address, orbs.address, unknown],
        )
        .unwrap_err();

    assert!(matches!(err, CustodyError::TransferFailed { asset, .. } if asset == unknown));
    assert_eq!(host, before);
}

#[test]
fn rescue_rejected_mid_batch_reverts_earlier_sweeps_and_events() {
    let (orbs, usdc) = (token::orbs(), token::usdc());
    let (mut custody, mut registry) = deploy();
    fund(&custody, &mut registry, &orbs, 100);
    fund(&custody, &mut registry, &usdc, 100);
    let mut host = FreezingHost {
        inner: registry,
        frozen: usdc.address,
    };
    let ledgers_before = host.inner.clone();
    let events_before = custody.events().to_vec();

    let err = custody
        .rescue_assets(&mut host, &deployer(), &[orbs.address, usdc.address])
        .unwrap_err();

    assert_eq!(
        err,
        CustodyError::TransferFailed {
            asset: usdc.address,
            source: LedgerError::Rejected("holder is frozen".into()),
        }
    );
    assert_eq!(host.inner, ledgers_before);
    assert_eq!(custody.events(), events_before.as_slice());
    assert_eq!(
        balance(&host.inner, &orbs, &custody.custody_address()),
        whole(&orbs, 100)
    );
}

#[test]
fn rejected_single_transfer_leaves_balances_alone() {
    let usdc = token::usdc();
    let (mut custody, mut registry) = deploy();
    fund(&custody, &mut registry, &usdc, 10);
    let mut host = FreezingHost {
        inner: registry,
        frozen: usdc.address,
    };
    let events_before = custody.events().len();

    let err = custody
        .transfer_asset(&mut host, &deployer(), &usdc.address, 0)
        .unwrap_err();

    assert!(matches!(
        err,
        CustodyError::TransferFailed {
            source: LedgerError::Rejected(_),
            ..
        }
    ));
    assert_eq!(
        balance(&host.inner, &usdc, &custody.custody_address()),
        whole(&usdc, 10)
    );
    assert_eq!(custody.events().len(), events_before);
}

// ---------------------------------------------------------------------------
// Ownership Transfer
// ---------------------------------------------------------------------------

#[test]
fn new_owner_can_withdraw_reserve() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);
    let before = balance(&host, &orbs, &new_owner());

    custody
        .transfer_ownership(&deployer(), new_owner())
        .unwrap();
    custody
        .transfer_primary_reserve(&mut host, &new_owner(), 0)
        .unwrap();

    assert_eq!(balance(&host, &orbs, &custody.custody_address()), 0);
    assert_eq!(
        balance(&host, &orbs, &new_owner()) - before,
        whole(&orbs, 100)
    );
}

#[test]
fn previous_owner_loses_authority() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);

    custody
        .transfer_ownership(&deployer(), new_owner())
        .unwrap();
    let err = custody
        .transfer_primary_reserve(&mut host, &deployer(), 0)
        .unwrap_err();

    assert!(err.to_string().contains("caller is not the owner"));
    assert_eq!(
        custody.transfer_ownership(&deployer(), deployer()),
        Err(CustodyError::Unauthorized { caller: deployer() })
    );
    assert_eq!(
        balance(&host, &orbs, &custody.custody_address()),
        whole(&orbs, 100)
    );
}

#[test]
fn custody_address_cannot_become_owner() {
    let orbs = token::orbs();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &orbs, 100);
    let at = custody.custody_address();

    assert_eq!(
        custody.transfer_ownership(&deployer(), at),
        Err(CustodyError::CustodyAsOwner)
    );
    let sweeps = custody
        .rescue_assets(&mut host, &deployer(), &[orbs.address])
        .unwrap();

    assert_eq!(sweeps[0].amount, whole(&orbs, 100));
    assert_eq!(balance(&host, &orbs, &at), 0);
    assert_eq!(balance(&host, &orbs, &deployer()), whole(&orbs, 100));
}

#[test]
fn funds_always_follow_the_current_owner() {
    let usdc = token::usdc();
    let (mut custody, mut host) = deploy();
    fund(&custody, &mut host, &usdc, 10);

    custody
        .transfer_asset(&mut host, &deployer(), &usdc.address, whole(&usdc, 4))
        .unwrap();
    custody
        .transfer_ownership(&deployer(), new_owner())
        .unwrap();
    custody
        .rescue_assets(&mut host, &new_owner(), &[usdc.address])
        .unwrap();

    assert_eq!(balance(&host, &usdc, &deployer()), whole(&usdc, 4));
    assert_eq!(balance(&host, &usdc, &new_owner()), whole(&usdc, 6));
}
