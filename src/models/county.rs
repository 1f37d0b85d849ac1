use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsCounty {
    /// State FIPS code followed by the county FIPS code.
    pub fips: String,
    pub name: String,
    pub state: String,
}

impl UsCounty {
    pub fn new(state_fips: &str, county_fips: &str, name: String, state: String) -> Self {
        Self {
            fips: format!("{}{}", state_fips, county_fips),
            name,
            state,
        }
    }
}
