// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendance exception rules.
//!
//! Each rule inspects one employee-day: the generated schedule details
//! and the normalized punch list, both sorted ascending. A rule never
//! persists anything; it reports the timestamps and record ids that
//! triggered it and leaves deduplication to the caller.

use crate::error::DomainError;
use crate::schedule::ScheduleDetail;
use crate::types::{Punch, PunchAction, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of exception rule codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCode {
    /// Broken sign-in/sign-out alternation.
    MissPunch,
    /// Attendance with no matching scheduled shift.
    UnschedAtt,
    /// Scheduled shift with no matching attendance.
    MissAtt,
    /// Unscheduled overtime.
    UnschedOt,
    /// Late arrival.
    Tardy,
    /// Early departure.
    LvEarly,
    /// Early arrival.
    InEarly,
    /// Late departure.
    OutLate,
    /// Attendance overlapping approved leave.
    Ovrlp,
}

impl AlertCode {
    /// Returns the wire code of the rule.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissPunch => "MISSPUNCH",
            Self::UnschedAtt => "UNSCHEDATT",
            Self::MissAtt => "MISSATT",
            Self::UnschedOt => "UNSCHEDOT",
            Self::Tardy => "TARDY",
            Self::LvEarly => "LVEARLY",
            Self::InEarly => "INEARLY",
            Self::OutLate => "OUTLATE",
            Self::Ovrlp => "OVRLP",
        }
    }
}

impl FromStr for AlertCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MISSPUNCH" => Ok(Self::MissPunch),
            "UNSCHEDATT" => Ok(Self::UnschedAtt),
            "MISSATT" => Ok(Self::MissAtt),
            "UNSCHEDOT" => Ok(Self::UnschedOt),
            "TARDY" => Ok(Self::Tardy),
            "LVEARLY" => Ok(Self::LvEarly),
            "INEARLY" => Ok(Self::InEarly),
            "OUTLATE" => Ok(Self::OutLate),
            "OVRLP" => Ok(Self::Ovrlp),
            _ => Err(DomainError::InvalidAlertCode(s.to_string())),
        }
    }
}

impl std::fmt::Display for AlertCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A configured exception rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Canonical identifier assigned by the store.
    pub rule_id: i64,
    /// Display name.
    pub name: String,
    /// Which check this rule runs.
    pub code: AlertCode,
    /// How serious a violation is.
    pub severity: Severity,
    /// Tolerated delay, in minutes, before an early/late rule triggers.
    pub grace_period_min: i64,
    /// Largest delay, in minutes, still attributed to a scheduled shift.
    pub window_min: i64,
    /// Inactive rules are skipped entirely.
    pub active: bool,
    /// Daily hours above which overtime counts as unscheduled.
    pub overtime_threshold_hours: f64,
}

impl AlertRule {
    /// Creates a rule with the default severity, an active flag and an
    /// eight-hour overtime threshold.
    #[must_use]
    pub fn new(name: String, code: AlertCode, grace_period_min: i64, window_min: i64) -> Self {
        Self {
            rule_id: 0,
            name,
            code,
            severity: Severity::default(),
            grace_period_min,
            window_min,
            active: true,
            overtime_threshold_hours: 8.0,
        }
    }
}

/// The resolution state of a triggered alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    #[default]
    Unresolved,
    Resolved,
}

/// A persisted rule violation, linked to the punch or schedule detail
/// that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Canonical identifier assigned by the store.
    pub alert_id: i64,
    /// The moment of the triggering record.
    pub timestamp: DateTime<Utc>,
    /// The rule that fired.
    pub rule_id: i64,
    /// The triggering punch, for punch-anchored rules.
    pub punch_id: Option<i64>,
    /// The triggering schedule detail, for detail-anchored rules.
    pub detail_id: Option<i64>,
    /// Resolution state.
    pub state: AlertState,
}

impl Alert {
    /// Creates an unresolved alert anchored to a punch.
    #[must_use]
    pub const fn for_punch(rule_id: i64, timestamp: DateTime<Utc>, punch_id: i64) -> Self {
        Self {
            alert_id: 0,
            timestamp,
            rule_id,
            punch_id: Some(punch_id),
            detail_id: None,
            state: AlertState::Unresolved,
        }
    }

    /// Creates an unresolved alert anchored to a schedule detail.
    #[must_use]
    pub const fn for_detail(rule_id: i64, timestamp: DateTime<Utc>, detail_id: i64) -> Self {
        Self {
            alert_id: 0,
            timestamp,
            rule_id,
            punch_id: None,
            detail_id: Some(detail_id),
            state: AlertState::Unresolved,
        }
    }
}

/// The records one rule flagged for one employee-day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleMatches {
    /// Flagged punches as `(timestamp, punch_id)`.
    pub punches: Vec<(DateTime<Utc>, i64)>,
    /// Flagged schedule details as `(start, detail_id)`.
    pub schedule_details: Vec<(DateTime<Utc>, i64)>,
}

impl RuleMatches {
    /// Returns whether the rule flagged nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.punches.is_empty() && self.schedule_details.is_empty()
    }
}

/// Whole minutes between two instants, truncated.
fn floor_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds() / 60
}

/// Runs one rule against an employee-day.
///
/// `details` and `punches` must be sorted ascending; `punches` should
/// already be normalized so midnight-crossing shifts pair up. `leaves`
/// holds the validated absence intervals overlapping the day, consumed
/// only by the leave-overlap rule.
#[must_use]
pub fn check_rule(
    rule: &AlertRule,
    details: &[ScheduleDetail],
    punches: &[Punch],
    leaves: &[(DateTime<Utc>, DateTime<Utc>)],
) -> RuleMatches {
    let mut matches = RuleMatches::default();

    match rule.code {
        AlertCode::MissPunch => check_miss_punch(punches, &mut matches),
        AlertCode::UnschedAtt => check_unsched_att(rule, details, punches, &mut matches),
        AlertCode::MissAtt => check_miss_att(rule, details, punches, &mut matches),
        AlertCode::UnschedOt => check_unsched_ot(rule, details, punches, &mut matches),
        AlertCode::Tardy => check_delay_band(
            rule,
            details,
            punches,
            PunchAction::SignIn,
            |detail, punch| floor_minutes(detail.date_start, punch.timestamp),
            &mut matches,
        ),
        AlertCode::InEarly => check_delay_band(
            rule,
            details,
            punches,
            PunchAction::SignIn,
            |detail, punch| floor_minutes(punch.timestamp, detail.date_start),
            &mut matches,
        ),
        AlertCode::LvEarly => check_delay_band(
            rule,
            details,
            punches,
            PunchAction::SignOut,
            |detail, punch| floor_minutes(punch.timestamp, detail.date_end),
            &mut matches,
        ),
        AlertCode::OutLate => check_delay_band(
            rule,
            details,
            punches,
            PunchAction::SignOut,
            |detail, punch| floor_minutes(detail.date_end, punch.timestamp),
            &mut matches,
        ),
        AlertCode::Ovrlp => check_leave_overlap(punches, leaves, &mut matches),
    }

    matches
}

/// Flags every punch that breaks the sign-in/sign-out alternation, and
/// a dangling final punch that is not a sign-out.
fn check_miss_punch(punches: &[Punch], matches: &mut RuleMatches) {
    let mut prev: Option<&Punch> = None;
    for punch in punches {
        let expected = match prev {
            None => PunchAction::SignIn,
            Some(p) if p.action == PunchAction::SignIn => PunchAction::SignOut,
            Some(_) => PunchAction::SignIn,
        };
        if punch.action != expected {
            matches.punches.push((punch.timestamp, punch.punch_id));
        }
        prev = Some(punch);
    }

    if let Some(last) = punches.last()
        && last.action != PunchAction::SignOut
    {
        matches.punches.push((last.timestamp, last.punch_id));
    }
}

/// Flags sign-ins with no scheduled shift starting within the window.
fn check_unsched_att(
    rule: &AlertRule,
    details: &[ScheduleDetail],
    punches: &[Punch],
    matches: &mut RuleMatches,
) {
    for punch in punches {
        if punch.action != PunchAction::SignIn {
            continue;
        }
        let matched = details.iter().any(|detail| {
            let difference = floor_minutes(detail.date_start, punch.timestamp).abs();
            difference < rule.window_min
        });
        if !matched {
            matches.punches.push((punch.timestamp, punch.punch_id));
        }
    }
}

/// Flags scheduled shifts with no sign-in within the window.
///
/// Only runs when there are more scheduled shifts than punches, so a
/// fully punched day is never scanned.
fn check_miss_att(
    rule: &AlertRule,
    details: &[ScheduleDetail],
    punches: &[Punch],
    matches: &mut RuleMatches,
) {
    if details.len() <= punches.len() {
        return;
    }

    for detail in details {
        let matched = punches.iter().any(|punch| {
            punch.action == PunchAction::SignIn
                && floor_minutes(detail.date_start, punch.timestamp).abs() < rule.window_min
        });
        if !matched {
            matches
                .schedule_details
                .push((detail.date_start, detail.detail_id));
        }
    }
}

/// Accumulates worked hours over completed sign-in/sign-out pairs and
/// flags the sign-out that pushes the total past the overtime threshold
/// on a day scheduled at or below it.
fn check_unsched_ot(
    rule: &AlertRule,
    details: &[ScheduleDetail],
    punches: &[Punch],
    matches: &mut RuleMatches,
) {
    let sched_hours: f64 = details
        .iter()
        .map(|detail| minutes_as_hours(floor_minutes(detail.date_start, detail.date_end)))
        .sum();

    let mut actual_hours = 0.0;
    let mut pair_start: Option<DateTime<Utc>> = None;
    for punch in punches {
        match punch.action {
            PunchAction::SignIn => pair_start = Some(punch.timestamp),
            PunchAction::SignOut => {
                let Some(start) = pair_start.take() else {
                    continue;
                };
                actual_hours += minutes_as_hours(floor_minutes(start, punch.timestamp));
                if actual_hours > rule.overtime_threshold_hours
                    && sched_hours <= rule.overtime_threshold_hours
                {
                    matches.punches.push((punch.timestamp, punch.punch_id));
                }
            }
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn minutes_as_hours(minutes: i64) -> f64 {
    minutes as f64 / 60.0
}

/// Shared body of the early/late rules.
///
/// For each scheduled shift the punch list is scanned for the first
/// punch of the given action whose delay falls strictly inside the
/// `(grace_period, window)` band; that punch is flagged. Delays in the
/// wrong direction count as zero.
fn check_delay_band(
    rule: &AlertRule,
    details: &[ScheduleDetail],
    punches: &[Punch],
    action: PunchAction,
    delay: impl Fn(&ScheduleDetail, &Punch) -> i64,
    matches: &mut RuleMatches,
) {
    for detail in details {
        let offender = punches.iter().find(|punch| {
            if punch.action != action {
                return false;
            }
            let difference = delay(detail, punch).max(0);
            rule.window_min > difference && difference > rule.grace_period_min
        });
        if let Some(punch) = offender {
            matches.punches.push((punch.timestamp, punch.punch_id));
        }
    }
}

/// Flags the first completed sign-in/sign-out pair that overlaps a
/// validated absence. At most one punch is flagged per day.
fn check_leave_overlap(
    punches: &[Punch],
    leaves: &[(DateTime<Utc>, DateTime<Utc>)],
    matches: &mut RuleMatches,
) {
    let mut pair_start: Option<DateTime<Utc>> = None;
    for punch in punches {
        match punch.action {
            PunchAction::SignIn => pair_start = Some(punch.timestamp),
            PunchAction::SignOut => {
                let Some(start) = pair_start.take() else {
                    continue;
                };
                let overlapping = leaves
                    .iter()
                    .any(|(leave_from, leave_to)| *leave_from <= punch.timestamp && *leave_to >= start);
                if overlapping {
                    matches.punches.push((punch.timestamp, punch.punch_id));
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Weekday;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, minute, 0).unwrap()
    }

    fn punch(id: i64, hour: u32, minute: u32, action: PunchAction) -> Punch {
        let mut p = Punch::new(1, ts(hour, minute), action);
        p.punch_id = id;
        p
    }

    fn detail(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> ScheduleDetail {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut d = ScheduleDetail::new(1, Weekday::Monday, day, start, end);
        d.detail_id = id;
        d
    }

    fn rule(code: AlertCode, grace: i64, window: i64) -> AlertRule {
        AlertRule::new("test".to_string(), code, grace, window)
    }

    #[test]
    fn test_misspunch_flags_repeated_sign_in() {
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 9, 0, PunchAction::SignIn),
        ];
        let result = check_rule(&rule(AlertCode::MissPunch, 0, 0), &[], &punches, &[]);
        // The second sign-in breaks alternation and also dangles.
        assert_eq!(result.punches.len(), 2);
        assert_eq!(result.punches[0].1, 2);
        assert_eq!(result.punches[1].1, 2);
    }

    #[test]
    fn test_misspunch_accepts_clean_pairs() {
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 12, 0, PunchAction::SignOut),
            punch(3, 13, 0, PunchAction::SignIn),
            punch(4, 17, 0, PunchAction::SignOut),
        ];
        let result = check_rule(&rule(AlertCode::MissPunch, 0, 0), &[], &punches, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_misspunch_flags_leading_sign_out() {
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignOut),
            punch(2, 9, 0, PunchAction::SignIn),
            punch(3, 17, 0, PunchAction::SignOut),
        ];
        let result = check_rule(&rule(AlertCode::MissPunch, 0, 0), &[], &punches, &[]);
        assert_eq!(result.punches, vec![(ts(8, 0), 1)]);
    }

    #[test]
    fn test_unsched_att_flags_unmatched_sign_in() {
        let details = vec![detail(1, ts(8, 0), ts(17, 0))];
        let punches = vec![
            punch(1, 8, 5, PunchAction::SignIn),
            punch(2, 21, 0, PunchAction::SignIn),
        ];
        let result = check_rule(&rule(AlertCode::UnschedAtt, 0, 60), &details, &punches, &[]);
        assert_eq!(result.punches, vec![(ts(21, 0), 2)]);
    }

    #[test]
    fn test_miss_att_flags_unpunched_shift() {
        let details = vec![
            detail(1, ts(8, 0), ts(12, 0)),
            detail(2, ts(13, 0), ts(17, 0)),
        ];
        let punches = vec![punch(1, 8, 0, PunchAction::SignIn)];
        let result = check_rule(&rule(AlertCode::MissAtt, 0, 60), &details, &punches, &[]);
        assert_eq!(result.schedule_details, vec![(ts(13, 0), 2)]);
    }

    #[test]
    fn test_miss_att_skipped_when_enough_punches() {
        let details = vec![detail(1, ts(8, 0), ts(17, 0))];
        let punches = vec![
            punch(1, 10, 0, PunchAction::SignIn),
            punch(2, 17, 0, PunchAction::SignOut),
        ];
        let result = check_rule(&rule(AlertCode::MissAtt, 0, 60), &details, &punches, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unsched_ot_flags_sign_out_past_threshold() {
        let details = vec![detail(1, ts(8, 0), ts(16, 0))];
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 18, 30, PunchAction::SignOut),
        ];
        let result = check_rule(&rule(AlertCode::UnschedOt, 0, 0), &details, &punches, &[]);
        assert_eq!(result.punches, vec![(ts(18, 30), 2)]);
    }

    #[test]
    fn test_unsched_ot_respects_configured_threshold() {
        let details = vec![detail(1, ts(8, 0), ts(16, 0))];
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 18, 30, PunchAction::SignOut),
        ];
        let mut lenient = rule(AlertCode::UnschedOt, 0, 0);
        lenient.overtime_threshold_hours = 12.0;
        let result = check_rule(&lenient, &details, &punches, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unsched_ot_not_flagged_when_scheduled_long() {
        // A 10-hour scheduled day worked as scheduled is not overtime.
        let details = vec![detail(1, ts(7, 0), ts(17, 0))];
        let punches = vec![
            punch(1, 7, 0, PunchAction::SignIn),
            punch(2, 17, 0, PunchAction::SignOut),
        ];
        let result = check_rule(&rule(AlertCode::UnschedOt, 0, 0), &details, &punches, &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_tardy_band() {
        let details = vec![detail(1, ts(9, 0), ts(17, 0))];
        let tardy = rule(AlertCode::Tardy, 10, 60);

        let late = vec![punch(1, 9, 15, PunchAction::SignIn)];
        let result = check_rule(&tardy, &details, &late, &[]);
        assert_eq!(result.punches, vec![(ts(9, 15), 1)]);

        let within_grace = vec![punch(1, 9, 5, PunchAction::SignIn)];
        assert!(check_rule(&tardy, &details, &within_grace, &[]).is_empty());

        let outside_window = vec![punch(1, 10, 30, PunchAction::SignIn)];
        assert!(check_rule(&tardy, &details, &outside_window, &[]).is_empty());
    }

    #[test]
    fn test_tardy_boundary_is_exclusive() {
        let details = vec![detail(1, ts(9, 0), ts(17, 0))];
        let tardy = rule(AlertCode::Tardy, 10, 60);

        let at_grace = vec![punch(1, 9, 10, PunchAction::SignIn)];
        assert!(check_rule(&tardy, &details, &at_grace, &[]).is_empty());

        let at_window = vec![punch(1, 10, 0, PunchAction::SignIn)];
        assert!(check_rule(&tardy, &details, &at_window, &[]).is_empty());
    }

    #[test]
    fn test_in_early_band() {
        let details = vec![detail(1, ts(9, 0), ts(17, 0))];
        let early = vec![punch(1, 8, 30, PunchAction::SignIn)];
        let result = check_rule(&rule(AlertCode::InEarly, 10, 60), &details, &early, &[]);
        assert_eq!(result.punches, vec![(ts(8, 30), 1)]);
    }

    #[test]
    fn test_lv_early_and_out_late() {
        let details = vec![detail(1, ts(9, 0), ts(17, 0))];

        let left_early = vec![punch(1, 16, 30, PunchAction::SignOut)];
        let result = check_rule(&rule(AlertCode::LvEarly, 10, 60), &details, &left_early, &[]);
        assert_eq!(result.punches, vec![(ts(16, 30), 1)]);

        let stayed_late = vec![punch(2, 17, 45, PunchAction::SignOut)];
        let result = check_rule(&rule(AlertCode::OutLate, 10, 60), &details, &stayed_late, &[]);
        assert_eq!(result.punches, vec![(ts(17, 45), 2)]);
    }

    #[test]
    fn test_perfect_attendance_triggers_nothing() {
        let details = vec![detail(1, ts(9, 0), ts(17, 0))];
        let punches = vec![
            punch(1, 9, 0, PunchAction::SignIn),
            punch(2, 17, 0, PunchAction::SignOut),
        ];

        for code in [
            AlertCode::MissPunch,
            AlertCode::UnschedAtt,
            AlertCode::MissAtt,
            AlertCode::UnschedOt,
            AlertCode::Tardy,
            AlertCode::InEarly,
            AlertCode::LvEarly,
            AlertCode::OutLate,
            AlertCode::Ovrlp,
        ] {
            let result = check_rule(&rule(code, 10, 60), &details, &punches, &[]);
            assert!(result.is_empty(), "{code} flagged a perfect day");
        }
    }

    #[test]
    fn test_ovrlp_flags_first_overlapping_pair_only() {
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 12, 0, PunchAction::SignOut),
            punch(3, 13, 0, PunchAction::SignIn),
            punch(4, 17, 0, PunchAction::SignOut),
        ];
        let leaves = vec![(ts(10, 0), ts(15, 0))];
        let result = check_rule(&rule(AlertCode::Ovrlp, 0, 0), &[], &punches, &leaves);
        assert_eq!(result.punches, vec![(ts(12, 0), 2)]);
    }

    #[test]
    fn test_ovrlp_ignores_disjoint_leave() {
        let punches = vec![
            punch(1, 8, 0, PunchAction::SignIn),
            punch(2, 12, 0, PunchAction::SignOut),
        ];
        let leaves = vec![(ts(18, 0), ts(20, 0))];
        let result = check_rule(&rule(AlertCode::Ovrlp, 0, 0), &[], &punches, &leaves);
        assert!(result.is_empty());
    }

    #[test]
    fn test_code_round_trip() {
        assert_eq!("TARDY".parse::<AlertCode>().unwrap(), AlertCode::Tardy);
        assert_eq!(AlertCode::UnschedOt.as_str(), "UNSCHEDOT");
        assert!("BOGUS".parse::<AlertCode>().is_err());
    }
}
