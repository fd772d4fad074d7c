use crate::{error::MatchError, problem::booking::Booking, solution::solved_route::SolvedVisit};

/// Optional token in front of the numeric part of a shipment label.
pub const BOOKING_LABEL_PREFIX: &str = "Booking ";

/// Booking id reported for records that have no visit behind them.
pub const MISSING_BOOKING_ID: i64 = -1;

/// Resolves a solved visit back to the booking it was generated from.
pub fn match_booking<'a>(
    visit: &SolvedVisit,
    bookings: &'a [Booking],
) -> Result<&'a Booking, MatchError> {
    let mut matches = bookings
        .iter()
        .filter(|booking| booking.label() == visit.shipment_label);

    let Some(booking) = matches.next() else {
        return Err(MatchError::MissingBooking {
            label: visit.shipment_label.clone(),
        });
    };

    let others = matches.count();
    if others > 0 {
        return Err(MatchError::AmbiguousBooking {
            label: visit.shipment_label.clone(),
            count: others + 1,
        });
    }

    Ok(booking)
}

pub fn parse_booking_id(label: &str) -> Result<i64, MatchError> {
    label
        .strip_prefix(BOOKING_LABEL_PREFIX)
        .unwrap_or(label)
        .trim()
        .parse()
        .map_err(|_| MatchError::InvalidBookingLabel {
            label: label.to_owned(),
        })
}

pub fn booking_id_of(visit: Option<&SolvedVisit>) -> Result<i64, MatchError> {
    match visit {
        Some(visit) => parse_booking_id(&visit.shipment_label),
        None => Ok(MISSING_BOOKING_ID),
    }
}
