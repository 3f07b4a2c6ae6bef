#![no_main]

use huopm::model::{Database, ProfitTable};
use huopm::search::mine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing must never panic, only reject
    let Ok(db) = Database::from_text(input) else {
        return;
    };

    // The lattice is exponential in the number of items
    if db.items().len() > 12 {
        return;
    }

    // Every item earns its name length as unit profit
    let profits = ProfitTable::from_pairs(
        db.items()
            .into_iter()
            .map(|item| {
                let profit = item.as_str().len() as f64;
                (item, profit)
            }),
    )
    .expect("lengths are valid profits");

    let patterns = mine(&db, &profits, 1.0, 0.0).expect("thresholds are valid");
    for pattern in &patterns {
        assert!(pattern.utility() >= 1.0);
        assert!(pattern.occupancy() > 0.0 && pattern.occupancy() <= 1.0);
        assert!(pattern.support() >= 1 && pattern.support() <= db.len());
    }
});
