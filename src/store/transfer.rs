use crate::model::ImportRow;
use crate::store::{ListFilter, Store, StoreError};
use std::path::Path;

/// Write every record to `path` as CSV, all ten columns with a header row,
/// in the same order as an unfiltered `list`. Returns the number of records
/// written; an empty store returns 0 without touching the file.
pub fn export(store: &Store, path: &Path) -> Result<usize, StoreError> {
    let applications = store.list(&ListFilter::default())?;
    if applications.is_empty() {
        return Ok(0);
    }

    let mut writer = csv::Writer::from_path(path)?;
    for application in &applications {
        writer.serialize(application)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(applications.len())
}

/// Bulk-create one record per CSV row in `path`. Every row gets a fresh id
/// and `last_updated`; `id` and `last_updated` columns in the file are
/// ignored, and missing columns default exactly as in `add`. Rows are not
/// validated or deduplicated, so importing a file twice duplicates its rows.
pub fn import(store: &Store, path: &Path) -> Result<usize, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize::<ImportRow>()
        .collect::<Result<Vec<_>, _>>()?;
    store.import_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewApplication;
    use std::fs;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir, name: &str) -> Store {
        let store = Store::new(dir.path().join(name));
        store.init().expect("init");
        store
    }

    fn sample(company: &str, role: &str, date: &str) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            role: role.to_string(),
            date_applied: date.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn export_writes_header_and_all_rows() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");
        store.add(&sample("ACME", "SWE", "2025-11-01")).expect("add");
        store
            .add(&sample("Globex", "SRE", "2025-10-15"))
            .expect("add");

        let csv_path = dir.path().join("out.csv");
        let written = export(&store, &csv_path).expect("export");
        assert_eq!(written, 2);

        let contents = fs::read_to_string(&csv_path).expect("read");
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("id,company,role,location,date_applied,status,source,salary,notes,last_updated")
        );
        let first = lines.next().expect("first row");
        assert!(first.contains("ACME"), "newest date first: {first}");
        assert!(lines.next().expect("second row").contains("Globex"));
    }

    #[test]
    fn export_empty_store_touches_nothing() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let csv_path = dir.path().join("out.csv");
        let written = export(&store, &csv_path).expect("export");
        assert_eq!(written, 0);
        assert!(!csv_path.exists());
    }

    #[test]
    fn import_assigns_fresh_ids_and_timestamps() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let csv_path = dir.path().join("in.csv");
        fs::write(
            &csv_path,
            "id,company,role,location,date_applied,status,source,salary,notes,last_updated\n\
             99,ACME,SWE,Remote,2025-11-01,applied,referral,100k,hello,2020-01-01T00:00:00.000000Z\n",
        )
        .expect("write");

        let imported = import(&store, &csv_path).expect("import");
        assert_eq!(imported, 1);

        let listed = store.list(&ListFilter::default()).expect("list");
        assert_eq!(listed.len(), 1);
        assert_ne!(listed[0].id, 99);
        assert_ne!(listed[0].last_updated, "2020-01-01T00:00:00.000000Z");
        assert_eq!(listed[0].company, "ACME");
        assert_eq!(listed[0].notes, "hello");
    }

    #[test]
    fn import_skips_required_field_validation() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let csv_path = dir.path().join("in.csv");
        fs::write(&csv_path, "company,role\n,\n").expect("write");

        assert_eq!(import(&store, &csv_path).expect("import"), 1);
        let listed = store.list(&ListFilter::default()).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].company, "");
        assert_eq!(listed[0].role, "");
    }

    #[test]
    fn import_defaults_missing_status_to_applied() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let csv_path = dir.path().join("in.csv");
        fs::write(&csv_path, "company,role\nACME,SWE\n").expect("write");

        import(&store, &csv_path).expect("import");
        let listed = store.list(&ListFilter::default()).expect("list");
        assert_eq!(listed[0].status, "applied");
        assert_eq!(listed[0].location, "");
    }

    #[test]
    fn import_twice_duplicates_rows() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let csv_path = dir.path().join("in.csv");
        fs::write(&csv_path, "company,role\nACME,SWE\n").expect("write");

        import(&store, &csv_path).expect("import");
        import(&store, &csv_path).expect("import");
        assert_eq!(store.list(&ListFilter::default()).expect("list").len(), 2);
    }

    #[test]
    fn export_then_import_reproduces_content_tuples() {
        let dir = tempdir().expect("tempdir");
        let source = open_store(&dir, "source.db");
        source
            .add(&NewApplication {
                company: "ACME".to_string(),
                role: "SWE".to_string(),
                location: "Remote".to_string(),
                date_applied: "2025-11-01".to_string(),
                status: "interviewed".to_string(),
                source: "referral".to_string(),
                salary: "100k".to_string(),
                notes: "phone screen".to_string(),
            })
            .expect("add");
        source
            .add(&sample("Globex", "SRE", "2025-10-15"))
            .expect("add");

        let csv_path = dir.path().join("roundtrip.csv");
        export(&source, &csv_path).expect("export");

        let target = open_store(&dir, "target.db");
        import(&target, &csv_path).expect("import");

        let tuples = |store: &Store| -> Vec<(String, String, String, String, String)> {
            let mut rows: Vec<_> = store
                .list(&ListFilter::default())
                .expect("list")
                .into_iter()
                .map(|a| (a.company, a.role, a.location, a.date_applied, a.status))
                .collect();
            rows.sort();
            rows
        };
        assert_eq!(tuples(&source), tuples(&target));
    }

    #[test]
    fn import_missing_file_is_a_file_error() {
        let dir = tempdir().expect("tempdir");
        let store = open_store(&dir, "applications.db");

        let err = import(&store, &dir.path().join("missing.csv")).expect_err("import");
        assert!(matches!(err, StoreError::File(_)));
    }
}
