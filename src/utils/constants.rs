/// GeoNames geonameIds of the seven continents (see the GeoNames dump readme)
pub const CONTINENT_IDS: [u32; 7] = [
    6255146, 6255147, 6255148, 6255149, 6255151, 6255150, 6255152,
];

/// GeoNames lookup endpoint
pub const GEONAMES_API_URL: &str = "http://api.geonames.org/getJSON";

/// Environment variable holding the GeoNames account name
pub const GEONAMES_USER_VAR: &str = "GEONAMES_USER";

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "GEONAMES";

/// Status value GeoNames reports when the account is unusable or out of credits
pub const STATUS_ACCOUNT_EXHAUSTED: i64 = 10;

/// Number of tab separated columns in a gazetteer dump row
pub const GAZETTEER_FIELD_COUNT: usize = 19;

/// Minimum number of comma separated columns in a county row
pub const COUNTY_MIN_FIELDS: usize = 4;

/// Default input files
pub const DEFAULT_CITIES_INPUT: &str = "data/cities15000.txt";
pub const DEFAULT_COUNTIES_INPUT: &str = "data/us_counties.txt";

/// Default output files
pub const DEFAULT_CITIES_OUTPUT: &str = "src/cities.json";
pub const DEFAULT_CONTINENTS_OUTPUT: &str = "src/continents.json";
pub const DEFAULT_COUNTIES_OUTPUT: &str = "src/us_counties.json";

/// Rows between progress updates
pub const PROGRESS_INTERVAL: u64 = 1000;
