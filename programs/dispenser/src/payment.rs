//! Fee splitting for every payment-bearing instruction.
//!
//! Amounts are lamports. A split always satisfies
//! `organizer_share + fee_share == amount`; any rounding remainder is
//! assigned to the fee share.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::*;
use crate::errors::DispenserError;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FeePolicy {
    /// Fee is `fee_bps` basis points of the amount.
    Percentage { fee_bps: u64 },
    /// Flat fee chosen by comparing the amount against `threshold`.
    Tiered {
        threshold: u64,
        below: u64,
        at_or_above: u64,
    },
}

impl FeePolicy {
    pub const REDEMPTION: FeePolicy = FeePolicy::Percentage {
        fee_bps: REDEMPTION_FEE_BPS,
    };

    pub const CROWDFUNDING: FeePolicy = FeePolicy::Tiered {
        threshold: CROWDFUNDING_FEE_THRESHOLD,
        below: CROWDFUNDING_FEE_LOW,
        at_or_above: CROWDFUNDING_FEE_HIGH,
    };
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Split {
    pub organizer_share: u64,
    pub fee_share: u64,
}

impl Split {
    pub fn total(&self) -> Result<u64> {
        self.organizer_share
            .checked_add(self.fee_share)
            .ok_or_else(|| error!(DispenserError::ArithmeticOverflow))
    }

    /// Transfer amounts in payment order: organizer, then treasury. Both
    /// legs are always paid, even when one of them is zero.
    pub fn legs(&self) -> [u64; 2] {
        [self.organizer_share, self.fee_share]
    }
}

pub fn split(amount: u64, policy: FeePolicy) -> Result<Split> {
    let organizer_share = match policy {
        FeePolicy::Percentage { fee_bps } => {
            let keep_bps = BPS_DENOMINATOR
                .checked_sub(fee_bps)
                .ok_or(DispenserError::ArithmeticOverflow)?;
            let share = (amount as u128)
                .checked_mul(keep_bps as u128)
                .and_then(|v| v.checked_div(BPS_DENOMINATOR as u128))
                .ok_or(DispenserError::ArithmeticOverflow)?;
            u64::try_from(share).map_err(|_| DispenserError::ArithmeticOverflow)?
        }
        FeePolicy::Tiered {
            threshold,
            below,
            at_or_above,
        } => {
            let fee = if amount >= threshold { at_or_above } else { below };
            amount
                .checked_sub(fee)
                .ok_or(DispenserError::InsufficientFunds)?
        }
    };

    let fee_share = amount
        .checked_sub(organizer_share)
        .ok_or(DispenserError::ArithmeticOverflow)?;

    Ok(Split {
        organizer_share,
        fee_share,
    })
}

/// Pays both shares out of `payer` within the current instruction, one
/// transfer per leg.
///
/// The balance is checked before either transfer is issued, so a short
/// payer never produces a half-paid split.
pub fn pay_split<'info>(
    payer: &Signer<'info>,
    organizer: &SystemAccount<'info>,
    treasury: &SystemAccount<'info>,
    system_program: &Program<'info, System>,
    split: Split,
) -> Result<()> {
    let total = split.total()?;
    require!(payer.lamports() >= total, DispenserError::InsufficientFunds);

    let recipients = [organizer.to_account_info(), treasury.to_account_info()];
    for (to, amount) in recipients.into_iter().zip(split.legs()) {
        system_program::transfer(
            CpiContext::new(
                system_program.to_account_info(),
                Transfer {
                    from: payer.to_account_info(),
                    to,
                },
            ),
            amount,
        )?;
    }

    Ok(())
}
