//! Month grid for the calendar widget.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Cells in a rendered month: six Sunday-first weeks.
pub const GRID_CELLS: usize = 42;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Displayed month. `month0` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    pub month0: u32,
}

impl CalendarCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn prev_month(&mut self) {
        if self.month0 == 0 {
            self.month0 = 11;
            self.year -= 1;
        } else {
            self.month0 -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month0 == 11 {
            self.month0 = 0;
            self.year += 1;
        } else {
            self.month0 += 1;
        }
    }

    /// Header text, e.g. `January 2024`.
    pub fn title(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month0 as usize)
            .copied()
            .unwrap_or_default();
        format!("{name} {}", self.year)
    }

    fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }
}

pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let (next_year, next_month) = if month0 == 11 {
        (year + 1, 1)
    } else {
        (year, month0 + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    /// False for the greyed-out days of the neighbouring months.
    pub in_month: bool,
    pub is_today: bool,
    pub has_event: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub title: String,
    pub cells: Vec<CalendarCell>,
}

/// Lays out the cursor's month. `event_dates` marks in-month days that carry a countdown.
pub fn render_month(
    cursor: CalendarCursor,
    today: NaiveDate,
    event_dates: &[NaiveDate],
) -> CalendarGrid {
    let mut cells = Vec::with_capacity(GRID_CELLS);
    let Some(first) = cursor.first_day() else {
        return CalendarGrid {
            title: cursor.title(),
            cells,
        };
    };

    let leading = first.weekday().num_days_from_sunday();
    let mut previous = cursor;
    previous.prev_month();
    let previous_len = days_in_month(previous.year, previous.month0);
    for offset in (0..leading).rev() {
        cells.push(CalendarCell {
            day: previous_len - offset,
            in_month: false,
            is_today: false,
            has_event: false,
        });
    }

    for day in 1..=days_in_month(cursor.year, cursor.month0) {
        let date = first.with_day(day);
        cells.push(CalendarCell {
            day,
            in_month: true,
            is_today: date == Some(today),
            has_event: date.is_some_and(|d| event_dates.contains(&d)),
        });
    }

    let mut day = 1;
    while cells.len() < GRID_CELLS {
        cells.push(CalendarCell {
            day,
            in_month: false,
            is_today: false,
            has_event: false,
        });
        day += 1;
    }

    CalendarGrid {
        title: cursor.title(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("date")
    }

    #[test]
    fn january_2024_layout() {
        let grid = render_month(
            CalendarCursor::containing(date(2024, 1, 15)),
            date(2024, 1, 15),
            &[date(2024, 1, 20), date(2024, 2, 1)],
        );
        assert_eq!(grid.title, "January 2024");
        assert_eq!(grid.cells.len(), GRID_CELLS);

        assert_eq!(grid.cells[0].day, 31);
        assert!(!grid.cells[0].in_month);
        assert_eq!(grid.cells[1].day, 1);
        assert!(grid.cells[1].in_month);

        let in_month = grid.cells.iter().filter(|c| c.in_month).count();
        assert_eq!(in_month, 31);
        let trailing = grid.cells.iter().skip(32).map(|c| c.day).collect::<Vec<_>>();
        assert_eq!(trailing, (1..=10).collect::<Vec<_>>());

        let today = grid.cells.iter().filter(|c| c.is_today).collect::<Vec<_>>();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].day, 15);

        let events = grid
            .cells
            .iter()
            .filter(|c| c.has_event)
            .map(|c| c.day)
            .collect::<Vec<_>>();
        assert_eq!(events, vec![20]);
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_cells() {
        // September 2024 starts on a Sunday.
        let grid = render_month(
            CalendarCursor::containing(date(2024, 9, 1)),
            date(2000, 1, 1),
            &[],
        );
        assert_eq!(grid.cells[0].day, 1);
        assert!(grid.cells[0].in_month);
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn navigation_wraps_years() {
        let mut cursor = CalendarCursor::containing(date(2024, 1, 10));
        cursor.prev_month();
        assert_eq!(cursor, CalendarCursor { year: 2023, month0: 11 });
        assert_eq!(cursor.title(), "December 2023");
        cursor.next_month();
        cursor.next_month();
        assert_eq!(cursor, CalendarCursor { year: 2024, month0: 1 });
    }

    #[test]
    fn month_lengths_handle_leap_years() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 3), 30);
    }
}
