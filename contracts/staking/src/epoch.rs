//! Epoch arithmetic.
//!
//! The epoch clock contract only reports the epoch length. The engine turns
//! ledger time into epoch numbers with an [`EpochCursor`]: an anchor
//! `(timestamp, epoch)` plus the length in force since that anchor. Until the
//! length changes the epoch number is simply `timestamp / length`. When a new
//! length is observed the anchor moves to the start of the current epoch, so
//! epoch numbers never go backwards and elapsed boundaries are never recounted.
//! The replaced regime is kept in the cursor's history so the duration of any
//! past epoch can still be priced at the length it actually ran with.

use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

use crate::errors::ContractError;

#[contractclient(name = "EpochClockClient")]
pub trait EpochClock {
    /// Epoch length in seconds.
    fn get_epoch(env: Env) -> u64;
}

/// A stretch of epochs that all ran with the same length.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochSegment {
    pub start_epoch: u64,
    pub start_timestamp: u64,
    pub epoch_length: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochCursor {
    pub anchor_timestamp: u64,
    pub anchor_epoch: u64,
    pub epoch_length: u64,
    /// Earlier segments, oldest first.
    pub history: Vec<EpochSegment>,
}

/// The epoch view a single call works against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EpochSnapshot {
    pub current_epoch: u64,
}

impl EpochCursor {
    pub fn genesis(env: &Env, epoch_length: u64) -> Self {
        EpochCursor {
            anchor_timestamp: 0,
            anchor_epoch: 0,
            epoch_length,
            history: Vec::new(env),
        }
    }

    pub fn epoch_at(&self, timestamp: u64) -> u64 {
        let elapsed = timestamp.saturating_sub(self.anchor_timestamp);
        self.anchor_epoch
            .saturating_add(elapsed / self.epoch_length.max(1))
    }

    /// Switches to `new_length` from the start of the epoch containing `timestamp`.
    pub fn observe_length(&mut self, timestamp: u64, new_length: u64) -> Result<(), ContractError> {
        if new_length == 0 {
            return Err(ContractError::InvalidEpochLength);
        }
        if new_length == self.epoch_length {
            return Ok(());
        }
        let epoch = self.epoch_at(timestamp);
        let epochs_since_anchor = epoch - self.anchor_epoch;
        if epochs_since_anchor > 0 {
            self.history.push_back(EpochSegment {
                start_epoch: self.anchor_epoch,
                start_timestamp: self.anchor_timestamp,
                epoch_length: self.epoch_length,
            });
        }
        self.anchor_timestamp = self
            .anchor_timestamp
            .saturating_add(epochs_since_anchor.saturating_mul(self.epoch_length));
        self.anchor_epoch = epoch;
        self.epoch_length = new_length;
        Ok(())
    }

    /// Timestamp at which `epoch` starts, under the length it ran with.
    pub fn epoch_start(&self, epoch: u64) -> Result<u64, ContractError> {
        let (start_epoch, start_timestamp, length) = if epoch >= self.anchor_epoch {
            (self.anchor_epoch, self.anchor_timestamp, self.epoch_length)
        } else {
            let mut found = (0, 0, self.epoch_length);
            for segment in self.history.iter() {
                if segment.start_epoch > epoch {
                    break;
                }
                found = (
                    segment.start_epoch,
                    segment.start_timestamp,
                    segment.epoch_length,
                );
            }
            found
        };
        (epoch - start_epoch)
            .checked_mul(length)
            .and_then(|offset| start_timestamp.checked_add(offset))
            .ok_or(ContractError::Overflow)
    }

    /// Seconds covered by the epochs in `[from, to)`.
    pub fn seconds_between(&self, from: u64, to: u64) -> Result<u64, ContractError> {
        if to <= from {
            return Ok(0);
        }
        Ok(self.epoch_start(to)? - self.epoch_start(from)?)
    }
}

/// Reads the clock, folds any length change into `cursor`, and returns the
/// epoch this call runs in.
pub fn advance(env: &Env, clock: &Address, cursor: &mut EpochCursor) -> Result<EpochSnapshot, ContractError> {
    let length = EpochClockClient::new(env, clock).get_epoch();
    let now = env.ledger().timestamp();
    cursor.observe_length(now, length)?;
    Ok(EpochSnapshot {
        current_epoch: cursor.epoch_at(now),
    })
}
