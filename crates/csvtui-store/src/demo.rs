// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Generated employee tables for `--demo` sessions and wide-table tests.

use crate::CsvData;

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const CITIES: [&str; 10] = [
    "Austin",
    "Seattle",
    "Denver",
    "Madison",
    "Portland",
    "Raleigh",
    "Boise",
    "Tucson",
    "Omaha",
    "Savannah",
];
const DEPARTMENTS: [&str; 8] = [
    "Engineering",
    "Finance",
    "Facilities",
    "Marketing",
    "Operations",
    "Procurement",
    "Research and Development",
    "Support",
];

struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for wide employee-style tables. Same seed, same table.
pub struct TableFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl TableFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub const HEADERS: [&'static str; 9] = [
        "id",
        "first name",
        "last name",
        "city",
        "department",
        "salary",
        "rating",
        "remote",
        "manager notes",
    ];

    /// Generates `count` rows. Roughly one row in eight leaves the notes blank.
    pub fn employees(&mut self, count: usize) -> CsvData {
        let headers = Self::HEADERS.iter().map(|h| (*h).to_owned()).collect();
        let rows = (1..=count).map(|id| self.employee_row(id)).collect();
        CsvData { headers, rows }
    }

    fn employee_row(&mut self, id: usize) -> Vec<String> {
        let first = self.pick(&FIRST_NAMES).to_owned();
        let last = self.pick(&LAST_NAMES).to_owned();
        let city = self.pick(&CITIES).to_owned();
        let department = self.pick(&DEPARTMENTS).to_owned();
        let salary = 40_000 + self.rng.int_n(120) * 1_000;
        let rating = format!("{}.{}", 1 + self.rng.int_n(5), self.rng.int_n(10));
        let remote = self.rng.bool().to_string();
        let notes = if self.rng.int_n(8) == 0 {
            String::new()
        } else {
            format!("reports to {} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
        };

        vec![
            id.to_string(),
            first,
            last,
            city,
            department,
            salary.to_string(),
            rating,
            remote,
            notes,
        ]
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::TableFaker;

    #[test]
    fn new_deterministic_seed() {
        let left = TableFaker::new(42).employees(20);
        let right = TableFaker::new(42).employees(20);
        assert_eq!(left, right);
    }

    #[test]
    fn zero_seed_is_normalized() {
        assert_eq!(TableFaker::new(0).seed(), 1);
    }

    #[test]
    fn employees_have_full_rows() {
        let table = TableFaker::new(7).employees(50);
        assert_eq!(table.rows.len(), 50);
        for (index, row) in table.rows.iter().enumerate() {
            assert_eq!(row.len(), TableFaker::HEADERS.len());
            assert_eq!(row[0], (index + 1).to_string());
            assert!(row[7] == "true" || row[7] == "false");
        }
    }

    #[test]
    fn int_n() {
        let mut faker = TableFaker::new(42);
        for _ in 0..100 {
            assert!(faker.int_n(5) < 5);
        }
        assert_eq!(faker.int_n(1), 0);
    }
}
