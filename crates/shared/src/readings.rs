//! Weekday Bible reading plan.
//!
//! Three independent tracks (Old Testament year one, Psalms, New
//! Testament) indexed by the number of weekdays elapsed since 1 January.
//! Weekends have no readings; a track that runs out before year end
//! yields empty references rather than wrapping.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::ReadingPlanEntry;

/// Readings for the given date, or `None` on Saturday and Sunday.
pub fn reading_plan(date: NaiveDate) -> Option<ReadingPlanEntry> {
    if is_weekend(date) {
        return None;
    }

    let year_start = NaiveDate::from_ymd_opt(date.year(), 1, 1)?;
    let index = count_weekdays(year_start, date);

    Some(ReadingPlanEntry {
        old_testament: track_entry(&old_testament_track(), index),
        psalm: track_entry(&psalm_track(), index),
        new_testament: track_entry(&new_testament_track(), index),
    })
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Weekdays between `start` (inclusive) and `end` (exclusive).
fn count_weekdays(start: NaiveDate, end: NaiveDate) -> usize {
    let mut count = 0;
    let mut current = start;
    while current < end {
        if !is_weekend(current) {
            count += 1;
        }
        current += Duration::days(1);
    }
    count
}

// Past the end of a track means the plan is finished for the year, not an error.
fn track_entry(track: &[String], index: usize) -> String {
    track.get(index).cloned().unwrap_or_default()
}

fn abbreviate(book: &str) -> &str {
    match book {
        "Genesis" => "Gen.",
        "Exodus" => "Ex.",
        "Leviticus" => "Lev.",
        "Numbers" => "Num.",
        "Deuteronomy" => "Deut.",
        "Joshua" => "Josh.",
        "Judges" => "Judg.",
        "1 Samuel" => "1 Sam.",
        "2 Samuel" => "2 Sam.",
        "1 Chronicles" => "1 Chron.",
        "2 Chronicles" => "2 Chron.",
        "Nehemiah" => "Neh.",
        "Esther" => "Est.",
        "Psalms" => "Ps.",
        "Proverbs" => "Prov",
        "Ecclesiastes" => "Eccles.",
        "Song of Solomon" | "Song of Songs" => "Song",
        "Isaiah" => "Isa.",
        "Jeremiah" => "Jer.",
        "Lamentations" => "Lam.",
        "Ezekiel" => "Ezek.",
        "Daniel" => "Dan.",
        "Hosea" => "Hos.",
        "Obadiah" => "Obad.",
        "Micah" => "Micah",
        "Habakkuk" => "Hab.",
        "Zephaniah" => "Zeph.",
        "Haggai" => "Hag.",
        "Zechariah" => "Zech.",
        "Malachi" => "Mal.",
        "Matthew" => "Matt.",
        "Romans" => "Rom.",
        "1 Corinthians" => "1 Cor.",
        "2 Corinthians" => "2 Cor.",
        "Galatians" => "Gal.",
        "Ephesians" => "Eph.",
        "Philippians" => "Phil.",
        "Colossians" => "Col.",
        "1 Thessalonians" => "1 Thess.",
        "2 Thessalonians" => "2 Thess.",
        "1 Timothy" => "1 Tim.",
        "2 Timothy" => "2 Tim.",
        "Philemon" => "Philem.",
        "Hebrews" => "Heb.",
        "1 Peter" => "1 Pet.",
        "2 Peter" => "2 Pet.",
        "Revelation" => "Rev",
        other => other,
    }
}

/// One entry per chapter of `book`, from chapter 1 through `last`.
fn chapters(track: &mut Vec<String>, book: &str, last: u32) {
    chapters_from(track, book, 1, last);
}

fn chapters_from(track: &mut Vec<String>, book: &str, first: u32, last: u32) {
    let short = abbreviate(book);
    for chapter in first..=last {
        track.push(format!("{short} {chapter}"));
    }
}

fn old_testament_track() -> Vec<String> {
    let mut track = Vec::new();

    chapters(&mut track, "Genesis", 50);
    chapters(&mut track, "Exodus", 40);
    chapters(&mut track, "Joshua", 11);
    chapters_from(&mut track, "Judges", 6, 9);
    chapters(&mut track, "Ruth", 4);
    chapters(&mut track, "1 Samuel", 30);
    chapters(&mut track, "2 Samuel", 24);
    chapters(&mut track, "1 Kings", 22);
    chapters(&mut track, "Ezra", 10);
    for grouped in ["1", "2-3", "4", "5", "6-7", "8", "9", "10", "11-13"] {
        track.push(format!("Neh. {grouped}"));
    }
    chapters(&mut track, "Esther", 10);
    chapters(&mut track, "Isaiah", 6);
    chapters_from(&mut track, "Isaiah", 40, 66);
    chapters(&mut track, "Daniel", 6);
    chapters(&mut track, "Jonah", 4);

    track
}

// Psalms short enough to pair with their neighbour in a single sitting.
const SHORT_PSALMS: [u32; 23] = [
    3, 11, 13, 23, 29, 32, 39, 43, 52, 57, 63, 69, 76, 79, 86, 92, 99, 104, 111, 116, 120, 122,
    137,
];

fn psalm_track() -> Vec<String> {
    let mut track = Vec::new();

    let push_range = |track: &mut Vec<String>, from: u32, to: u32| {
        let mut psalm = from;
        while psalm < to {
            if SHORT_PSALMS.contains(&psalm) {
                track.push(format!("Ps. {} - {}", psalm, psalm + 1));
                psalm += 2;
            } else {
                track.push(format!("Ps. {psalm}"));
                psalm += 1;
            }
        }
    };

    push_range(&mut track, 1, 119);

    // Psalm 119 is read in four parts
    for verses in ["v1-32", "v33-96", "v97-144", "v145-176"] {
        track.push(format!("Ps. 119 {verses}"));
    }

    push_range(&mut track, 120, 151);

    track
}

fn new_testament_track() -> Vec<String> {
    let mut track = Vec::new();

    chapters(&mut track, "Luke", 24);
    chapters(&mut track, "Acts", 28);
    chapters(&mut track, "Romans", 16);
    chapters(&mut track, "Matthew", 28);
    chapters(&mut track, "1 Corinthians", 16);
    chapters(&mut track, "2 Corinthians", 13);
    chapters(&mut track, "Galatians", 6);
    chapters(&mut track, "Ephesians", 6);
    chapters(&mut track, "Philippians", 4);
    chapters(&mut track, "Colossians", 4);
    chapters(&mut track, "Mark", 16);
    chapters(&mut track, "1 Thessalonians", 5);
    chapters(&mut track, "2 Thessalonians", 3);
    chapters(&mut track, "1 Timothy", 6);
    chapters(&mut track, "2 Timothy", 4);
    chapters(&mut track, "Titus", 3);
    track.push("Philem.".to_string());
    chapters(&mut track, "Hebrews", 13);
    chapters(&mut track, "John", 21);
    chapters(&mut track, "James", 5);
    chapters(&mut track, "1 Peter", 5);
    chapters(&mut track, "2 Peter", 3);
    chapters(&mut track, "1 John", 5);
    track.push("2 John".to_string());
    track.push("3 John".to_string());
    track.push("Jude".to_string());
    chapters(&mut track, "Revelation", 22);

    track
}
