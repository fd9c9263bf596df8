use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": "E001",
        "name": "Alice Rahman",
        "designation": "Software Engineer",
        "dateOfJoining": "2021-03-15"
    })
)]
pub struct Employee {
    #[schema(example = "E001")]
    pub id: String,

    #[schema(example = "Alice Rahman")]
    pub name: String,

    #[schema(example = "Software Engineer")]
    pub designation: String,

    #[schema(example = "2021-03-15", format = "date")]
    pub date_of_joining: String,
}

impl Employee {
    fn new(id: &str, name: &str, designation: &str, date_of_joining: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            designation: designation.to_string(),
            date_of_joining: date_of_joining.to_string(),
        }
    }
}

/// Reference set used when no directory file is configured.
static BUILTIN_EMPLOYEES: Lazy<Vec<Employee>> = Lazy::new(|| {
    vec![
        Employee::new("E001", "Alice Rahman", "Software Engineer", "2021-03-15"),
        Employee::new("E002", "Bashir Ahmed", "QA Engineer", "2020-07-01"),
        Employee::new("E003", "Chandra Das", "Project Manager", "2018-11-20"),
        Employee::new("E004", "Dipa Chakma", "HR Executive", "2022-01-10"),
        Employee::new("E005", "Ehsan Karim", "DevOps Engineer", "2019-05-27"),
    ]
});

/// Static employee lookup keyed by id, with a secondary name index.
#[derive(Debug, Clone)]
pub struct EmployeeDirectory {
    employees: Vec<Employee>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl EmployeeDirectory {
    pub fn new(employees: Vec<Employee>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(employees.len());
        let mut by_name = HashMap::with_capacity(employees.len());

        for (idx, employee) in employees.iter().enumerate() {
            if by_id.insert(employee.id.clone(), idx).is_some() {
                bail!("duplicate employee id {}", employee.id);
            }
            // first entry wins when two employees share a name
            by_name.entry(employee.name.clone()).or_insert(idx);
        }

        Ok(Self {
            employees,
            by_id,
            by_name,
        })
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_EMPLOYEES.clone()).expect("builtin employee ids are unique")
    }

    /// Load the directory from a JSON array file, or fall back to the builtin set.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading employee directory {}", path.display()))?;
        let employees: Vec<Employee> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing employee directory {}", path.display()))?;

        Self::new(employees)
    }

    pub fn by_id(&self, id: &str) -> Option<&Employee> {
        self.by_id.get(id).map(|&idx| &self.employees[idx])
    }

    pub fn by_name(&self, name: &str) -> Option<&Employee> {
        self.by_name.get(name).map(|&idx| &self.employees[idx])
    }

    pub fn all(&self) -> &[Employee] {
        &self.employees
    }
}
