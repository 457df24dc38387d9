#![no_main]
use libfuzzer_sys::fuzz_target;
use scoop::catalog::{parse_catalog_csv, IngredientCatalog};

/// Fuzz the ingredient catalog CSV reader.
///
/// Also prefixes input with a valid header so the row and quoting logic is
/// reached more often than the header check.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_catalog_csv(s);

        if s.len() < 10_000 {
            let wrapped = format!("classification,ingredient\n{s}");
            if let Ok(catalog) = IngredientCatalog::from_csv_str(&wrapped) {
                assert!(catalog.groups().all(|g| !g.is_empty()));
            }
        }
    }
});
