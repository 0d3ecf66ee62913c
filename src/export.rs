use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::{Deserialize, Serialize};

use crate::catalog::ProfileCatalog;
use crate::engine::{RatingRun, RatingTable, ScopeDiagnostics, SkippedScope};
use crate::position::CanonicalPosition;
use crate::records::Scope;

pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeSummary {
    pub scope: Scope,
    pub league_weight: f64,
    pub diagnostics: ScopeDiagnostics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingArtifact {
    pub version: u32,
    pub generated_at: String,
    #[serde(default)]
    pub scopes: Vec<ScopeSummary>,
    #[serde(default)]
    pub skipped: Vec<SkippedScope>,
    #[serde(default)]
    pub table: RatingTable,
}

impl RatingArtifact {
    pub fn from_run(run: &RatingRun) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            generated_at: chrono::Utc::now().to_rfc3339(),
            scopes: run
                .scopes
                .iter()
                .map(|s| ScopeSummary {
                    scope: s.scope.clone(),
                    league_weight: s.league_weight,
                    diagnostics: s.diagnostics.clone(),
                })
                .collect(),
            skipped: run.skipped.clone(),
            table: run.table(),
        }
    }
}

pub fn save_artifact(path: &Path, artifact: &RatingArtifact) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create output dir {}", parent.display()))?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(artifact).context("serialize rating artifact")?;
    fs::write(&tmp, json).context("write rating artifact")?;
    fs::rename(&tmp, path).context("swap rating artifact")?;
    Ok(())
}

pub fn load_artifact(path: &Path) -> Result<RatingArtifact> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read rating artifact {}", path.display()))?;
    let artifact: RatingArtifact =
        serde_json::from_str(&raw).context("parse rating artifact")?;
    if artifact.version != ARTIFACT_VERSION {
        bail!(
            "unsupported rating artifact version {} (expected {})",
            artifact.version,
            ARTIFACT_VERSION
        );
    }
    Ok(artifact)
}

enum Cell {
    Text(String),
    Number(f64),
}

pub fn export_workbook(path: &Path, run: &RatingRun, catalog: &ProfileCatalog) -> Result<usize> {
    let table = run.table();
    let mut workbook = Workbook::new();
    let mut sheets = 0usize;

    for position in CanonicalPosition::ALL {
        let profiles = catalog.profiles(position);
        let rows: Vec<_> = table.for_position(position).collect();
        if profiles.is_empty() || rows.is_empty() {
            continue;
        }

        let mut cells: Vec<Vec<Cell>> = Vec::with_capacity(rows.len() + 1);
        let mut header: Vec<Cell> = ["Player", "Team", "League", "Season", "Minutes"]
            .iter()
            .map(|h| Cell::Text(h.to_string()))
            .collect();
        header.extend(profiles.iter().map(|p| Cell::Text(p.name.clone())));
        cells.push(header);

        for row in rows {
            let mut line = vec![
                Cell::Text(row.player.clone()),
                Cell::Text(row.team.clone()),
                Cell::Text(row.competition.clone()),
                Cell::Text(row.season.clone()),
                Cell::Number(row.minutes),
            ];
            for p in profiles {
                line.push(match row.rating(&p.name) {
                    Some(v) => Cell::Number(v),
                    None => Cell::Text(String::new()),
                });
            }
            cells.push(line);
        }

        let sheet = workbook.add_worksheet();
        sheet.set_name(position.label())?;
        write_cells(sheet, &cells)?;
        sheets += 1;
    }

    {
        let mut cells = vec![
            ["League", "Season", "Status", "Weight", "Records", "Rated", "Excluded", "At Floor"]
                .iter()
                .map(|h| Cell::Text(h.to_string()))
                .collect::<Vec<_>>(),
        ];
        for s in &run.scopes {
            let d = &s.diagnostics;
            cells.push(vec![
                Cell::Text(s.scope.competition.clone()),
                Cell::Text(s.scope.season.clone()),
                Cell::Text("rated".to_string()),
                Cell::Number(s.league_weight),
                Cell::Number(d.records as f64),
                Cell::Number(d.rated as f64),
                Cell::Number(d.excluded as f64),
                Cell::Number(d.gated_to_floor as f64),
            ]);
        }
        for s in &run.skipped {
            cells.push(vec![
                Cell::Text(s.scope.competition.clone()),
                Cell::Text(s.scope.season.clone()),
                Cell::Text(format!("skipped: {}", s.reason)),
            ]);
        }
        let sheet = workbook.add_worksheet();
        sheet.set_name("Scopes")?;
        write_cells(sheet, &cells)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(sheets)
}

fn write_cells(worksheet: &mut Worksheet, rows: &[Vec<Cell>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let (r, c) = (row_idx as u32, col_idx as u16);
            match cell {
                Cell::Text(s) => worksheet.write_string(r, c, s),
                Cell::Number(v) => worksheet.write_number(r, c, *v),
            }
            .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
