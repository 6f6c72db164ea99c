//! Core daily record domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::Error;

/// Database identifier for a daily record.
pub type RecordId = i64;

/// A single day's takings, broken down by source, for one user.
///
/// All amounts are whole rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub id: RecordId,
    /// The calendar date the record is for, in the server's local timezone.
    pub date: Date,
    /// Takings received by bank transfer.
    pub transfer_amount: i64,
    /// Cash takings from the afternoon shift.
    pub afternoon_shift_amount: i64,
    /// Cash takings from the night shift.
    pub night_shift_amount: i64,
    /// The total reported by the point-of-sale system.
    pub system_amount: i64,
}

impl DailyRecord {
    /// The sum of the manually counted takings.
    pub fn total(&self) -> i64 {
        self.transfer_amount + self.afternoon_shift_amount + self.night_shift_amount
    }

    /// How far the counted total is from the point-of-sale system total.
    ///
    /// Positive means the count came out above the system total.
    pub fn difference(&self) -> i64 {
        self.total() - self.system_amount
    }
}

/// Form data for creating and editing a daily record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFormData {
    pub date: Date,
    pub transfer_amount: i64,
    pub afternoon_shift_amount: i64,
    pub night_shift_amount: i64,
    pub system_amount: i64,
}

impl RecordFormData {
    /// Check that no amount is negative.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NegativeAmount] if any amount is below zero.
    pub fn validate(&self) -> Result<(), Error> {
        let amounts = [
            self.transfer_amount,
            self.afternoon_shift_amount,
            self.night_shift_amount,
            self.system_amount,
        ];

        if amounts.iter().any(|amount| *amount < 0) {
            return Err(Error::NegativeAmount);
        }

        Ok(())
    }
}

#[cfg(test)]
mod daily_record_tests {
    use time::macros::date;

    use crate::Error;

    use super::{DailyRecord, RecordFormData};

    fn sample_record() -> DailyRecord {
        DailyRecord {
            id: 1,
            date: date!(2025 - 08 - 30),
            transfer_amount: 150_000,
            afternoon_shift_amount: 250_000,
            night_shift_amount: 300_000,
            system_amount: 680_000,
        }
    }

    #[test]
    fn total_sums_transfer_and_shifts() {
        assert_eq!(sample_record().total(), 700_000);
    }

    #[test]
    fn difference_subtracts_system_amount() {
        assert_eq!(sample_record().difference(), 20_000);
    }

    #[test]
    fn difference_can_be_negative() {
        let record = DailyRecord {
            system_amount: 750_000,
            ..sample_record()
        };

        assert_eq!(record.difference(), -50_000);
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let form = RecordFormData {
            date: date!(2025 - 08 - 30),
            transfer_amount: -1,
            afternoon_shift_amount: 0,
            night_shift_amount: 0,
            system_amount: 0,
        };

        assert_eq!(form.validate(), Err(Error::NegativeAmount));
    }

    #[test]
    fn validate_accepts_zero_amounts() {
        let form = RecordFormData {
            date: date!(2025 - 08 - 30),
            transfer_amount: 0,
            afternoon_shift_amount: 0,
            night_shift_amount: 0,
            system_amount: 0,
        };

        assert!(form.validate().is_ok());
    }
}
