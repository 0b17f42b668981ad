use chrono::{DateTime, Datelike, Utc};

use crate::error::ValidationError;
use crate::signature::gateway_offset;

pub fn validate_card_holder_name(name: &str) -> Result<(), ValidationError> {
    if name.split_whitespace().count() < 2 {
        return Err(ValidationError::CardHolderName);
    }

    Ok(())
}

/// Luhn checksum over a 13 to 19 digit card number. Spaces are ignored.
pub fn luhn_check(card_no: &str) -> bool {
    let digits: Vec<u32> = match card_no
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
    {
        Some(digits) => digits,
        None => return false,
    };

    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

pub fn validate_card_no(card_no: &str) -> Result<(), ValidationError> {
    if !luhn_check(card_no) {
        return Err(ValidationError::CardNumber);
    }

    Ok(())
}

/**
`MM/YY`; the card stays valid through the last day of the expiry month,
judged on the gateway's calendar.
 */
pub fn validate_expire_date(expire_date: &str, now: DateTime<Utc>) -> Result<(), ValidationError> {
    let Some((month, year)) = expire_date.split_once('/') else {
        return Err(ValidationError::Expiry);
    };

    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(ValidationError::Expiry);
    }

    let (Ok(month), Ok(year)) = (month.parse::<u32>(), year.parse::<i32>()) else {
        return Err(ValidationError::Expiry);
    };

    if !(1..=12).contains(&month) {
        return Err(ValidationError::Expiry);
    }

    let today = now.with_timezone(&gateway_offset());

    if (2000 + year, month) < (today.year(), today.month()) {
        return Err(ValidationError::Expiry);
    }

    Ok(())
}

pub(crate) fn validate_card_at(
    card_holder_name: &str,
    card_no: &str,
    expire_date: &str,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    validate_card_holder_name(card_holder_name)?;
    validate_card_no(card_no)?;
    validate_expire_date(expire_date, now)
}
