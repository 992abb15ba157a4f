//! `apricot describe` - bulk rich-text description writer.
//!
//! Reads a TSV file with one product per row. Columns, in order:
//! `title`, `description`, `care`, `size`, `material`, `origin`, and
//! optionally `size_table_html`. A header row whose first cell is
//! `title` is skipped. Literal `\n` sequences in any cell become
//! newlines, so multi-line sections survive the single-line TSV format.

use std::path::Path;

use apricot_admin::AdminClient;
use apricot_core::types::richtext::ProductDescription;

#[derive(Debug)]
struct Row {
    title: String,
    description: ProductDescription,
    size_table_html: Option<String>,
}

fn parse_row(line: &str, line_number: usize) -> Result<Row, String> {
    let cells: Vec<String> = line
        .split('\t')
        .map(|cell| cell.replace("\\n", "\n"))
        .collect();
    if cells.len() != 6 && cells.len() != 7 {
        return Err(format!(
            "line {line_number}: expected 6 or 7 tab-separated columns, found {}",
            cells.len()
        ));
    }
    Ok(Row {
        title: cells[0].clone(),
        description: ProductDescription {
            description: cells[1].clone(),
            care: cells[2].clone(),
            size: cells[3].clone(),
            material: cells[4].clone(),
            origin: cells[5].clone(),
        },
        size_table_html: cells.get(6).filter(|c| !c.is_empty()).cloned(),
    })
}

pub async fn run(client: &AdminClient, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if index == 0 && line.split('\t').next() == Some("title") {
            continue;
        }
        let row = parse_row(line, index + 1)?;
        let product_id = client.product_id_by_title(&row.title).await?;
        match &row.size_table_html {
            Some(size_table) => {
                client
                    .update_description_and_size_table(&product_id, &row.description, size_table)
                    .await?;
            }
            None => {
                client
                    .set_product_description_document(&product_id, &row.description)
                    .await?;
            }
        }
        tracing::info!(title = %row.title, %product_id, "description written");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_column_row_has_no_size_table() {
        let row = parse_row("Coat\tWarm wool coat\tDry clean\tS/M/L\tWool 100%\t日本", 2).unwrap();
        assert_eq!(row.title, "Coat");
        assert_eq!(row.description.origin, "日本");
        assert!(row.size_table_html.is_none());
    }

    #[test]
    fn seventh_column_becomes_the_size_table() {
        let row = parse_row("Coat\ta\tb\tc\td\te\t<table></table>", 2).unwrap();
        assert_eq!(row.size_table_html.as_deref(), Some("<table></table>"));
    }

    #[test]
    fn escaped_newlines_are_expanded() {
        let row = parse_row("Coat\tline one\\nline two\tb\tc\td\te", 2).unwrap();
        assert_eq!(row.description.description, "line one\nline two");
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let err = parse_row("Coat\tonly-two", 3).unwrap_err();
        assert!(err.contains("line 3"));
    }
}
