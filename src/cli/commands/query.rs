//! One-shot query commands.
//!
//! Each invocation builds its own service, so it performs exactly one
//! upstream fetch.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::Value;

use crate::cli::output::{entries_table, list_table, output, render_list, CommandOutput};
use crate::cli::types::Commands;
use crate::domain::models::{Period, PeriodFilter, RankedEntry, SearchHit};
use crate::services::IndexService;

#[derive(Debug, Serialize)]
pub struct IndustriesOutput {
    pub industries: Vec<String>,
}

impl CommandOutput for IndustriesOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["industry"]);
        for industry in &self.industries {
            table.add_row(vec![industry]);
        }
        render_list("industry", "industries", &table, self.industries.len())
    }
}

#[derive(Debug, Serialize)]
pub struct PeriodsOutput {
    pub industry: Option<String>,
    pub periods: Vec<Period>,
}

impl CommandOutput for PeriodsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["year", "month"]);
        for period in &self.periods {
            table.add_row(vec![period.year.clone(), period.month.to_string()]);
        }
        render_list("period", "periods", &table, self.periods.len())
    }
}

#[derive(Debug, Serialize)]
pub struct CompaniesOutput {
    pub industry: String,
    #[serde(flatten)]
    pub period: PeriodFilter,
    pub companies: Vec<String>,
}

impl CommandOutput for CompaniesOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["company"]);
        for company in &self.companies {
            table.add_row(vec![company]);
        }
        format!(
            "{}\n{}",
            self.industry,
            render_list("company", "companies", &table, self.companies.len())
        )
    }
}

#[derive(Debug, Serialize)]
pub struct EntriesOutput {
    pub results: Vec<RankedEntry>,
}

impl CommandOutput for EntriesOutput {
    fn to_human(&self) -> String {
        render_list(
            "entry",
            "entries",
            &entries_table(&self.results),
            self.results.len(),
        )
    }

    fn to_json(&self) -> Value {
        match self.results.as_slice() {
            [single] => serde_json::to_value(single).unwrap_or_default(),
            _ => serde_json::to_value(self).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub company: String,
    pub results: Vec<SearchHit>,
}

impl CommandOutput for SearchOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["company", "industry", "rank"]);
        for hit in &self.results {
            let rank = match &hit.ranking {
                Value::Null => "-".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            table.add_row(vec![hit.company.clone(), hit.industry.clone(), rank]);
        }
        render_list("match", "matches", &table, self.results.len())
    }
}

/// Run a query command against `service`.
pub async fn execute(command: Commands, service: &IndexService, json: bool) -> Result<()> {
    match command {
        Commands::Industries => {
            let industries = service.list_industries().await?;
            output(&IndustriesOutput { industries }, json);
        }
        Commands::Periods { industry } => {
            let periods = service.available_periods(industry.as_deref()).await?;
            output(
                &PeriodsOutput {
                    industry: industry.map(|i| i.to_uppercase()),
                    periods,
                },
                json,
            );
        }
        Commands::Companies { industry, period } => {
            let filter = period.filter();
            let companies = service.industry_companies(&industry, filter.clone()).await?;
            output(
                &CompaniesOutput {
                    industry: industry.to_uppercase(),
                    period: filter,
                    companies,
                },
                json,
            );
        }
        Commands::Company { name, period } => {
            let filter = period.filter();
            let results = if filter.is_unset() {
                service.company_entries(&name, filter).await?
            } else {
                service.company_by_name(&name, filter).await?.into_iter().collect()
            };
            if results.is_empty() {
                bail!("Company not found: {name}");
            }
            output(&EntriesOutput { results }, json);
        }
        Commands::Rank {
            industry,
            rank,
            period,
        } => {
            let Some(entry) = service.nth_rank(rank, &industry, period.filter()).await? else {
                bail!("No company at rank {rank} in {}", industry.to_uppercase());
            };
            output(&EntriesOutput { results: vec![entry] }, json);
        }
        Commands::Rankings {
            industry,
            limit,
            offset,
            period,
        } => {
            let results = service
                .rankings(&industry, limit, offset, period.filter())
                .await?;
            output(&EntriesOutput { results }, json);
        }
        Commands::Search {
            query,
            limit,
            period,
        } => {
            let results = service
                .search_companies(&query, limit as usize, period.filter())
                .await?;
            output(
                &SearchOutput {
                    company: query,
                    results,
                },
                json,
            );
        }
        Commands::Discover => {
            let schema = service.discovery_schema().await?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Commands::Serve(_) => bail!("serve is not a query command"),
    }
    Ok(())
}
