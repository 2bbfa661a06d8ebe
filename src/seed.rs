use std::collections::HashSet;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Record;

struct SeedCustomer {
    name: &'static str,
    description: &'static str,
    status: &'static str,
    rate: &'static str,
    balance: &'static str,
    deposit: &'static str,
}

/// Bundled customer dataset used when no seed file is configured.
const CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer { name: "Ann Culhane", description: "Monthly retainer, design", status: "Open", rate: "70.00", balance: "-270.00", deposit: "500.00" },
    SeedCustomer { name: "Ahmad Rosser", description: "Website maintenance", status: "Paid", rate: "70.00", balance: "270.00", deposit: "500.00" },
    SeedCustomer { name: "Zain Calzoni", description: "Logo refresh", status: "Unpaid", rate: "70.00", balance: "-20.00", deposit: "500.00" },
    SeedCustomer { name: "Leo Stanton", description: "Hosting and support", status: "Due", rate: "70.00", balance: "600.00", deposit: "500.00" },
    SeedCustomer { name: "Kaiya Vetrovs", description: "SEO audit", status: "Paid", rate: "70.00", balance: "-350.00", deposit: "500.00" },
    SeedCustomer { name: "Ryan Westervelt", description: "Copywriting", status: "Paid", rate: "70.00", balance: "-270.00", deposit: "500.00" },
    SeedCustomer { name: "Corey Stanton", description: "App prototype", status: "Due", rate: "70.00", balance: "30.00", deposit: "500.00" },
    SeedCustomer { name: "Adison Aminoff", description: "Brand workshop", status: "Open", rate: "70.00", balance: "-270.00", deposit: "500.00" },
    SeedCustomer { name: "Alfredo Aminoff", description: "Email campaign", status: "Inactive", rate: "70.00", balance: "460.00", deposit: "500.00" },
    SeedCustomer { name: "Allison Botosh", description: "Photography", status: "Paid", rate: "85.00", balance: "0.00", deposit: "250.00" },
    SeedCustomer { name: "Emerson Dias", description: "Quarterly retainer, dev", status: "Open", rate: "95.00", balance: "-1,140.00", deposit: "1,000.00" },
    SeedCustomer { name: "Marilyn Geidt", description: "Accessibility review", status: "Unpaid", rate: "60.00", balance: "-180.00", deposit: "0.00" },
    SeedCustomer { name: "Haylie Press", description: "Packaging design", status: "Due", rate: "75.00", balance: "-525.00", deposit: "300.00" },
    SeedCustomer { name: "Tatiana Franci", description: "Social media kit", status: "Paid", rate: "55.00", balance: "110.00", deposit: "200.00" },
    SeedCustomer { name: "Jordyn Lubin", description: "Illustration set", status: "Open", rate: "65.00", balance: "-65.00", deposit: "150.00" },
    SeedCustomer { name: "Giana Kenter", description: "Conference booth", status: "Inactive", rate: "80.00", balance: "0.00", deposit: "0.00" },
    SeedCustomer { name: "Cristofer Saris", description: "Analytics dashboard", status: "Due", rate: "110.00", balance: "-880.00", deposit: "500.00" },
    SeedCustomer { name: "Phillip Korsgaard", description: "Newsletter template", status: "Paid", rate: "50.00", balance: "50.00", deposit: "100.00" },
    SeedCustomer { name: "Desirae Rhiel", description: "Product photos", status: "Unpaid", rate: "85.00", balance: "-340.00", deposit: "0.00" },
    SeedCustomer { name: "Lincoln Workman", description: "Monthly retainer, support", status: "Open", rate: "70.00", balance: "-140.00", deposit: "500.00" },
    SeedCustomer { name: "Marcus Carder", description: "Video edit", status: "Paid", rate: "90.00", balance: "360.00", deposit: "400.00" },
    SeedCustomer { name: "Kierra Bergson", description: "Pitch deck", status: "Due", rate: "75.00", balance: "-225.00", deposit: "0.00" },
];

/// The bundled dataset with ids `1..=n`.
pub fn builtin() -> Vec<Record> {
    CUSTOMERS
        .iter()
        .enumerate()
        .map(|(i, c)| Record {
            id: (i + 1) as u64,
            name: c.name.to_string(),
            description: c.description.to_string(),
            status: c.status.to_string(),
            rate: c.rate.to_string(),
            balance: c.balance.to_string(),
            deposit: c.deposit.to_string(),
        })
        .collect()
}

/// Load records from a `.json` array or a `.csv` file with a header row.
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    let records: Vec<Record> = match ext.as_str() {
        "json" => {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        }
        "csv" => {
            let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
            rdr.deserialize::<Record>().collect::<std::result::Result<Vec<_>, _>>()?
        }
        _ => return Err(AppError::UnknownFormat(path.display().to_string())),
    };
    let records = assign_ids(records)?;
    tracing::info!(count = records.len(), path = %path.display(), "loaded seed file");
    Ok(records)
}

/// Give id-less rows (id 0) sequential ids after the largest one present.
fn assign_ids(mut records: Vec<Record>) -> Result<Vec<Record>> {
    let mut seen = HashSet::new();
    for r in records.iter().filter(|r| r.id != 0) {
        if !seen.insert(r.id) {
            return Err(AppError::DuplicateId(r.id));
        }
    }
    let mut last = seen.iter().copied().max().unwrap_or(0);
    for r in records.iter_mut().filter(|r| r.id == 0) {
        last = last.checked_add(1).ok_or(AppError::IdOverflow(last))?;
        r.id = last;
    }
    Ok(records)
}

/// Resolve the configured seed: a file if one is given, otherwise the bundle.
pub fn load(path: Option<&Path>) -> Result<Vec<Record>> {
    match path {
        Some(p) => load_file(p),
        None => Ok(builtin()),
    }
}
