//! Output formatters for command results.

use clap::ValueEnum;
use comfy_table::{Cell, ContentArrangement, Table};
use tetherlens_proto::{
    render_cell, ColumnSpec, ContractInfo, EntityType, EventRecord, RenderHint,
};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format an event table.
    fn format_events(&self, columns: &[ColumnSpec], rows: &[EventRecord]) -> String;

    /// Format the detail view of one event.
    fn format_detail(&self, entity: EntityType, rows: &[(&'static str, String)]) -> String;

    /// Format the entity catalogue.
    fn format_entities(&self, entities: &[EntityType]) -> String;

    /// Format contract and endpoint information.
    fn format_info(&self, contract: &ContractInfo, endpoint: &str) -> String;

    /// Format the result of a hex or cipher operation.
    fn format_conversion(&self, operation: &str, output: &str) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Columns backed by a record field; the action column has no terminal form.
fn data_columns(columns: &[ColumnSpec]) -> impl Iterator<Item = &ColumnSpec> {
    columns.iter().filter(|column| column.field_key().is_some())
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_events(&self, columns: &[ColumnSpec], rows: &[EventRecord]) -> String {
        if rows.is_empty() {
            return "No results".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(data_columns(columns).map(|c| Cell::new(c.label)).collect::<Vec<_>>());

        for record in rows {
            let cells: Vec<Cell> = data_columns(columns)
                .map(|column| {
                    let text = render_cell(record, column);
                    match column.hint {
                        RenderHint::Ellipsis => Cell::new(abbreviate(&text)),
                        _ => Cell::new(text),
                    }
                })
                .collect();
            table.add_row(cells);
        }

        format!("{}\n{} row(s)", table, rows.len())
    }

    fn format_detail(&self, entity: EntityType, rows: &[(&'static str, String)]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Field", "Value"]);
        table.add_row(vec!["Event Type", entity.title()]);
        for (label, value) in rows {
            table.add_row(vec![*label, value.as_str()]);
        }
        table.to_string()
    }

    fn format_entities(&self, entities: &[EntityType]) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Entity", "Event", "Fields", "Description"]);

        for entity in entities {
            table.add_row(vec![
                entity.as_str().to_string(),
                entity.title().to_string(),
                entity.descriptor().fields().join(", "),
                entity.description().to_string(),
            ]);
        }

        table.to_string()
    }

    fn format_info(&self, contract: &ContractInfo, endpoint: &str) -> String {
        let mut table = Table::new();
        table.add_row(vec!["Contract", contract.name]);
        table.add_row(vec!["Address", contract.address]);
        table.add_row(vec!["Network", contract.network]);
        table.add_row(vec!["Endpoint", endpoint]);
        table.to_string()
    }

    fn format_conversion(&self, _operation: &str, output: &str) -> String {
        output.to_string()
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_events(&self, _columns: &[ColumnSpec], rows: &[EventRecord]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_detail(&self, entity: EntityType, rows: &[(&'static str, String)]) -> String {
        let mut fields = serde_json::Map::new();
        for (label, value) in rows {
            fields.insert(label.to_string(), serde_json::Value::String(value.clone()));
        }
        serde_json::to_string_pretty(&serde_json::json!({
            "entity": entity,
            "fields": fields,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_entities(&self, entities: &[EntityType]) -> String {
        let list: Vec<serde_json::Value> = entities
            .iter()
            .map(|entity| {
                serde_json::json!({
                    "entity": entity,
                    "title": entity.title(),
                    "description": entity.description(),
                    "fields": entity.descriptor().fields(),
                })
            })
            .collect();
        serde_json::to_string_pretty(&list).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_info(&self, contract: &ContractInfo, endpoint: &str) -> String {
        serde_json::to_string_pretty(&serde_json::json!({
            "contract": contract,
            "endpoint": endpoint,
        }))
        .unwrap_or_else(|_| "{}".to_string())
    }

    fn format_conversion(&self, operation: &str, output: &str) -> String {
        serde_json::json!({
            "operation": operation,
            "output": output,
        })
        .to_string()
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_events(&self, columns: &[ColumnSpec], rows: &[EventRecord]) -> String {
        let mut output = String::new();

        let header: Vec<&str> = data_columns(columns).map(|c| c.key).collect();
        output.push_str(&header.join(","));
        output.push('\n');

        for record in rows {
            let cells: Vec<String> = data_columns(columns)
                .map(|column| csv_field(record.get(column.key).unwrap_or_default()))
                .collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    fn format_detail(&self, entity: EntityType, rows: &[(&'static str, String)]) -> String {
        let mut output = String::from("field,value\n");
        output.push_str(&format!("Event Type,{}\n", csv_field(entity.title())));
        for (label, value) in rows {
            output.push_str(&format!("{},{}\n", csv_field(label), csv_field(value)));
        }
        output
    }

    fn format_entities(&self, entities: &[EntityType]) -> String {
        let mut output = String::from("entity,title,fields\n");
        for entity in entities {
            output.push_str(&format!(
                "{},{},{}\n",
                entity.as_str(),
                csv_field(entity.title()),
                csv_field(&entity.descriptor().fields().join(" "))
            ));
        }
        output
    }

    fn format_info(&self, contract: &ContractInfo, endpoint: &str) -> String {
        format!(
            "name,address,network,endpoint\n{},{},{},{}\n",
            csv_field(contract.name),
            contract.address,
            csv_field(contract.network),
            csv_field(endpoint)
        )
    }

    fn format_conversion(&self, operation: &str, output: &str) -> String {
        format!("operation,output\n{},{}\n", operation, csv_field(output))
    }
}

/// Shorten a long address to `0x1234…abcd`.
fn abbreviate(value: &str) -> String {
    const KEEP: usize = 6;
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 2 * KEEP + 1 {
        return value.to_string();
    }
    let head: String = chars[..KEEP].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Quote a CSV field when it needs it.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", escape_csv(value))
    } else {
        value.to_string()
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
