use chrono::{DateTime, Utc};

/// A venue's or artist's shows split around a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Schedule<T> {
    /// Shows starting before `now` are past, everything else is upcoming.
    /// Shows without a start time belong to neither list. Both lists are
    /// ordered by start time, and `build` turns each dated show into the
    /// listed entry.
    pub fn partition<I, S, F>(shows: I, now: DateTime<Utc>, mut build: F) -> Self
    where
        I: IntoIterator<Item = (Option<DateTime<Utc>>, S)>,
        F: FnMut(DateTime<Utc>, S) -> T,
    {
        let mut past = Vec::new();
        let mut upcoming = Vec::new();

        for (start_time, show) in shows {
            match start_time {
                Some(start_time) if start_time < now => past.push((start_time, show)),
                Some(start_time) => upcoming.push((start_time, show)),
                None => {}
            }
        }

        past.sort_by_key(|(start_time, _)| *start_time);
        upcoming.sort_by_key(|(start_time, _)| *start_time);

        Self {
            past: past
                .into_iter()
                .map(|(start_time, show)| build(start_time, show))
                .collect(),
            upcoming: upcoming
                .into_iter()
                .map(|(start_time, show)| build(start_time, show))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_partition_splits_on_now() {
        let now = now();
        let schedule = Schedule::partition(
            vec![
                (Some(now - Duration::days(3)), "old"),
                (Some(now + Duration::days(3)), "soon"),
                (Some(now), "starting"),
            ],
            now,
            |_, show| show,
        );

        assert_eq!(schedule.past, vec!["old"]);
        // A show starting exactly now is upcoming
        assert_eq!(schedule.upcoming, vec!["starting", "soon"]);
    }

    #[test]
    fn test_partition_drops_undated_shows() {
        let now = now();
        let schedule = Schedule::partition(
            vec![
                (None, "unscheduled"),
                (Some(now - Duration::hours(1)), "earlier"),
            ],
            now,
            |_, show| show,
        );

        assert_eq!(schedule.past.len() + schedule.upcoming.len(), 1);
        assert_eq!(schedule.past, vec!["earlier"]);
    }

    #[test]
    fn test_partition_orders_by_start_time() {
        let now = now();
        let schedule = Schedule::partition(
            vec![
                (Some(now + Duration::days(9)), 3),
                (Some(now + Duration::days(1)), 1),
                (Some(now + Duration::days(5)), 2),
                (Some(now - Duration::days(1)), -1),
                (Some(now - Duration::days(7)), -7),
            ],
            now,
            |_, show| show,
        );

        assert_eq!(schedule.upcoming, vec![1, 2, 3]);
        assert_eq!(schedule.past, vec![-7, -1]);
    }

    #[test]
    fn test_partition_empty() {
        let shows: Vec<(Option<DateTime<Utc>>, ())> = Vec::new();
        let schedule = Schedule::partition(shows, now(), |_, show| show);
        assert!(schedule.past.is_empty());
        assert!(schedule.upcoming.is_empty());
    }
}
