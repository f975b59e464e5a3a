//! Keeps daily sequences contiguous

use crate::domain::{
    DailyRecord,
    RecordSchema,
};

/// Date-ordered record sequence with contiguous days and ids.
///
/// Records must be pushed in ascending date order without duplicate days.
/// Days missing between two pushed records are filled with zeroed records.
pub struct DailySequence<'a> {
    schema: &'a RecordSchema,
    records: Vec<DailyRecord>,
    next_id: u64,
}

impl<'a> DailySequence<'a> {
    pub fn new(schema: &'a RecordSchema) -> Self {
        Self::starting_at(schema, 1)
    }

    pub fn starting_at(schema: &'a RecordSchema, next_id: u64) -> Self {
        Self {
            schema,
            records: Vec::new(),
            next_id,
        }
    }

    /// Appends `record` after zero-filling the days since the previous one.
    /// The record's id is overwritten.
    pub fn push(&mut self, record: DailyRecord) {
        if let Some(last_day) = self.records.last().map(|r| r.day) {
            let mut filled = 0;
            let mut cursor = last_day.succ_opt();

            while let Some(day) = cursor.filter(|day| *day < record.day) {
                let empty = DailyRecord::zeroed(self.schema, 0, day);
                self.append(empty);
                filled += 1;
                cursor = day.succ_opt();
            }

            if filled > 0 {
                tracing::debug!(
                    after = %last_day,
                    before = %record.day,
                    filled,
                    "Filled missing days"
                );
            }
        }

        self.append(record);
    }

    fn append(&mut self, mut record: DailyRecord) {
        record.id = self.next_id;
        self.next_id += 1;
        self.records.push(record);
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<DailyRecord> {
        self.records
    }
}

/// Inserts zeroed records for missing days and renumbers from `next_id`.
///
/// `records` must be sorted by day without duplicates. Empty input is
/// returned unchanged.
pub fn fill_gaps(
    schema: &RecordSchema, records: Vec<DailyRecord>, next_id: u64,
) -> Vec<DailyRecord> {
    if records.is_empty() {
        return records;
    }

    let mut sequence = DailySequence::starting_at(schema, next_id);
    for record in records {
        sequence.push(record);
    }
    sequence.into_records()
}
