// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance punch normalization.
//!
//! Shifts that cross midnight leave a dangling sign-out at the start of
//! a day or a dangling sign-in at its end. Normalization borrows the
//! matching punch from the adjacent day so the alert rules always see
//! complete sign-in/sign-out pairs.

use crate::types::{Punch, PunchAction};

/// Normalizes one day's punch list against its neighbours.
///
/// All three slices must be sorted ascending by timestamp. The result
/// is not persisted; it is consumed by alert computation only.
///
/// - If the day's first punch is not a sign-in and the previous day
///   ends with a sign-in, that sign-in is prepended; otherwise the
///   dangling first punch is dropped.
/// - If the day's last punch is not a sign-out and the next day begins
///   with a sign-out, that sign-out is appended; otherwise the dangling
///   last punch is dropped.
#[must_use]
pub fn normalize_punches(day: &[Punch], prev_day: &[Punch], next_day: &[Punch]) -> Vec<Punch> {
    let mut normalized: Vec<Punch> = day.to_vec();

    if let Some(first) = day.first()
        && first.action != PunchAction::SignIn
    {
        match prev_day.last() {
            Some(prev_last) if prev_last.action == PunchAction::SignIn => {
                normalized.insert(0, prev_last.clone());
            }
            _ => {
                normalized.remove(0);
            }
        }
    }

    if let Some(last) = day.last()
        && last.action != PunchAction::SignOut
    {
        match next_day.first() {
            Some(next_first) if next_first.action == PunchAction::SignOut => {
                normalized.push(next_first.clone());
            }
            _ => {
                normalized.pop();
            }
        }
    }

    normalized
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn punch(id: i64, hour: u32, action: PunchAction) -> Punch {
        let day_offset = hour / 24;
        let mut p = Punch::new(
            1,
            Utc.with_ymd_and_hms(2026, 3, 2 + day_offset, hour % 24, 0, 0)
                .unwrap(),
            action,
        );
        p.punch_id = id;
        p
    }

    #[test]
    fn test_already_paired_day_unchanged() {
        let day = vec![
            punch(1, 8, PunchAction::SignIn),
            punch(2, 17, PunchAction::SignOut),
        ];
        let result = normalize_punches(&day, &[], &[]);
        assert_eq!(result, day);
    }

    #[test]
    fn test_borrows_sign_in_from_previous_day() {
        let prev = vec![punch(1, 22, PunchAction::SignIn)];
        let day = vec![punch(2, 30, PunchAction::SignOut)];

        let result = normalize_punches(&day, &prev, &[]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].punch_id, 1);
        assert_eq!(result[1].punch_id, 2);
    }

    #[test]
    fn test_drops_dangling_first_punch() {
        let prev = vec![punch(1, 17, PunchAction::SignOut)];
        let day = vec![
            punch(2, 26, PunchAction::SignOut),
            punch(3, 32, PunchAction::SignIn),
            punch(4, 41, PunchAction::SignOut),
        ];

        let result = normalize_punches(&day, &prev, &[]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].punch_id, 3);
    }

    #[test]
    fn test_borrows_sign_out_from_next_day() {
        let day = vec![punch(1, 22, PunchAction::SignIn)];
        let next = vec![punch(2, 30, PunchAction::SignOut)];

        let result = normalize_punches(&day, &[], &next);
        assert_eq!(result.len(), 2);
        assert_eq!(result[1].punch_id, 2);
    }

    #[test]
    fn test_drops_dangling_last_punch() {
        let day = vec![
            punch(1, 8, PunchAction::SignIn),
            punch(2, 17, PunchAction::SignOut),
            punch(3, 22, PunchAction::SignIn),
        ];
        let next = vec![punch(4, 32, PunchAction::SignIn)];

        let result = normalize_punches(&day, &[], &next);
        assert_eq!(result.len(), 2);
        assert_eq!(result.last().unwrap().punch_id, 2);
    }

    #[test]
    fn test_empty_day() {
        let prev = vec![punch(1, 8, PunchAction::SignIn)];
        let result = normalize_punches(&[], &prev, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_dangling_sign_out_without_neighbours() {
        let day = vec![punch(1, 2, PunchAction::SignOut)];
        let result = normalize_punches(&day, &[], &[]);
        assert!(result.is_empty());
    }
}
