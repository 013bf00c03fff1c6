// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use csvtui_app::Table;
use csvtui_store::CsvStore;
use csvtui_tui::GridRuntime;
use std::path::{Path, PathBuf};

/// Runtime over a CSV file on disk.
pub struct StoreRuntime {
    store: CsvStore,
}

impl StoreRuntime {
    pub fn new(store: CsvStore) -> Self {
        Self { store }
    }
}

impl GridRuntime for StoreRuntime {
    fn source_label(&self) -> String {
        self.store.path().display().to_string()
    }

    fn save_original(&mut self, table: &Table) -> Result<()> {
        self.store
            .save(table.headers(), table.rows())
            .with_context(|| format!("save {}", self.store.path().display()))
    }

    fn save_filtered(&mut self, name: &Path, table: &Table) -> Result<PathBuf> {
        let path = self.store.sibling(name);
        csvtui_store::save(&path, table.headers(), table.rows())
            .with_context(|| format!("save filtered rows to {}", path.display()))?;
        Ok(path)
    }

    fn write_backup(&mut self, table: &Table) -> Result<()> {
        self.store
            .write_backup(table.headers(), table.rows())
            .with_context(|| format!("back up {}", self.store.path().display()))?;
        Ok(())
    }
}

/// Runtime for generated demo data. There is no source file, so only
/// filtered saves are possible.
#[derive(Debug, Default)]
pub struct DemoRuntime;

impl GridRuntime for DemoRuntime {
    fn source_label(&self) -> String {
        "demo data".to_owned()
    }

    fn save_original(&mut self, _table: &Table) -> Result<()> {
        bail!("demo data has no source file; apply a filter and quit to save a copy")
    }

    fn save_filtered(&mut self, name: &Path, table: &Table) -> Result<PathBuf> {
        csvtui_store::save(name, table.headers(), table.rows())
            .with_context(|| format!("save filtered rows to {}", name.display()))?;
        Ok(name.to_path_buf())
    }

    fn write_backup(&mut self, _table: &Table) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoRuntime, StoreRuntime};
    use anyhow::Result;
    use csvtui_app::Table;
    use csvtui_store::{CsvStore, backup_path};
    use csvtui_testkit::scores;
    use csvtui_tui::GridRuntime;
    use std::fs;
    use std::path::Path;

    fn scores_table() -> Table {
        let (headers, rows) = scores().into_parts();
        Table::new(headers, rows)
    }

    #[test]
    fn store_runtime_backs_up_then_saves() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("scores.csv");
        fs::write(&path, scores().to_csv()?)?;
        let mut runtime = StoreRuntime::new(CsvStore::open(&path)?);
        let table = scores_table();

        runtime.write_backup(&table)?;
        assert!(backup_path(&path).exists());

        runtime.save_original(&table)?;
        assert!(!backup_path(&path).exists());
        assert_eq!(fs::read_to_string(&path)?, scores().to_csv()?);
        Ok(())
    }

    #[test]
    fn filtered_saves_land_next_to_the_source() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("scores.csv");
        fs::write(&path, scores().to_csv()?)?;
        let mut runtime = StoreRuntime::new(CsvStore::open(&path)?);

        let written = runtime.save_filtered(Path::new("subset.csv"), &scores_table())?;
        assert_eq!(written, temp.path().join("subset.csv"));
        assert!(written.exists());
        assert!(runtime.source_label().ends_with("scores.csv"));
        Ok(())
    }

    #[test]
    fn save_errors_carry_context() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("scores.csv");
        fs::write(&path, scores().to_csv()?)?;
        let mut runtime = StoreRuntime::new(CsvStore::open(&path)?);

        let error = runtime
            .save_filtered(Path::new("missing/dir/out.csv"), &scores_table())
            .expect_err("missing directory should fail");
        assert!(error.to_string().starts_with("save filtered rows to "));
        Ok(())
    }

    #[test]
    fn demo_runtime_refuses_original_save() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let mut runtime = DemoRuntime;
        assert!(runtime.save_original(&scores_table()).is_err());
        runtime.write_backup(&scores_table())?;

        let target = temp.path().join("demo.csv");
        assert_eq!(runtime.save_filtered(&target, &scores_table())?, target);
        assert!(target.exists());
        Ok(())
    }
}
