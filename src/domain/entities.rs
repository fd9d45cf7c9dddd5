//! Domain entities: dams, tributary records and record parsing

use crate::domain::error::{DomainError, TreeResult};

/// A dam built on a tributary. Immutable value, owned by the node that
/// lists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dam {
    pub name: String,
    pub year_built: i32,
}

/// One parsed line of the record source (a node-descriptor).
///
/// `parent == None` marks the root record.
#[derive(Debug, Clone, PartialEq)]
pub struct TributaryRecord {
    pub name: String,
    pub parent: Option<String>,
    pub flow_rate: f64,
    pub dams: Vec<Dam>,
}

impl TributaryRecord {
    /// Parse one CSV line: `name,parent,flowRate,damsField`.
    ///
    /// The split is positional; missing trailing fields become empty
    /// strings, which read as "no parent" / "no dams" downstream. A
    /// non-numeric flow rate or dam year fails the whole line with
    /// `MalformedNumber`.
    pub fn parse(line: &str) -> TreeResult<Self> {
        let mut fields = line.splitn(4, ',');
        let name = fields.next().unwrap_or("").trim().to_string();
        let parent = fields.next().unwrap_or("").trim();
        let flow_field = fields.next().unwrap_or("").trim();
        let dams_field = fields.next().unwrap_or("").trim();

        let flow_rate: f64 = flow_field
            .parse()
            .map_err(|_| DomainError::MalformedNumber {
                field: "flow rate",
                value: flow_field.to_string(),
            })?;

        Ok(Self {
            name,
            parent: if parent.is_empty() {
                None
            } else {
                Some(parent.to_string())
            },
            flow_rate,
            dams: parse_dams(dams_field)?,
        })
    }
}

/// Parse the `;`-separated dam field: entries of the form `Name (Year)`.
/// Entries without a matching pair of parentheses are dropped.
fn parse_dams(field: &str) -> TreeResult<Vec<Dam>> {
    let mut dams = Vec::new();
    if field.is_empty() {
        return Ok(dams);
    }
    for entry in field.split(';') {
        let (Some(open), Some(close)) = (entry.find('('), entry.find(')')) else {
            continue;
        };
        if close < open {
            continue;
        }
        let year_field = entry[open + 1..close].trim();
        let year_built: i32 = year_field
            .parse()
            .map_err(|_| DomainError::MalformedNumber {
                field: "dam year",
                value: year_field.to_string(),
            })?;
        dams.push(Dam {
            name: entry[..open].trim().to_string(),
            year_built,
        });
    }
    Ok(dams)
}
