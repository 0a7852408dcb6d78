//! Regions, the counties they group and the cities inside each county.
//! Slugs are derived from the Romanian name, so the fixture carries none.

use serde::Deserialize;
use tixello_core::error::CoreError;
use tixello_core::i18n::Localized;
use tixello_core::natural_key::ensure_unique;
use tixello_core::slug::slugify;
use validator::Validate;

use super::{parse, validate_all};
use crate::error::SeedError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CityFixture {
    pub name: Localized<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    #[validate(range(min = 0))]
    pub population: Option<i32>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub capital: bool,
}

impl CityFixture {
    pub fn slug(&self) -> String {
        slugify(&self.name.ro)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegionFixture {
    #[validate(length(min = 1, max = 3))]
    pub code: String,
    #[serde(default)]
    pub featured: bool,
    pub name: Localized<String>,
}

impl RegionFixture {
    pub fn slug(&self) -> String {
        slugify(&self.name.ro)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CountyFixture {
    #[validate(length(min = 1, max = 3))]
    pub code: String,
    /// Code of the region this county belongs to.
    pub region: String,
    #[serde(default)]
    pub featured: bool,
    pub name: Localized<String>,
    #[validate(nested)]
    pub cities: Vec<CityFixture>,
}

impl CountyFixture {
    pub fn slug(&self) -> String {
        slugify(&self.name.ro)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Locations {
    /// ISO 3166-1 alpha-2 code written on every row.
    pub country: String,
    /// IANA zone written on every city.
    pub timezone: String,
    pub regions: Vec<RegionFixture>,
    pub counties: Vec<CountyFixture>,
}

impl Locations {
    pub const NAME: &'static str = "locations.json";

    pub fn load() -> Result<Self, SeedError> {
        parse(Self::NAME, include_str!("../../fixtures/locations.json"))
    }

    /// Region and county slugs and codes are unique, every county names a
    /// known region, and city slugs are unique within their county.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.country.len() != 2 || self.timezone.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "country '{}' and timezone '{}' must both be set",
                self.country, self.timezone
            )));
        }
        validate_all(&self.regions)?;
        validate_all(&self.counties)?;
        ensure_unique("region", self.regions.iter().map(RegionFixture::slug))?;
        ensure_unique("region code", self.regions.iter().map(|r| r.code.as_str()))?;
        ensure_unique("county", self.counties.iter().map(CountyFixture::slug))?;
        ensure_unique("county code", self.counties.iter().map(|c| c.code.as_str()))?;

        for region in &self.regions {
            region.name.ensure_present("region", &region.code)?;
            if region.slug().is_empty() {
                return Err(CoreError::Validation(format!(
                    "region '{}' has no usable name for a slug",
                    region.code
                )));
            }
        }

        for county in &self.counties {
            county.name.ensure_present("county", &county.code)?;
            let slug = county.slug();
            if slug.is_empty() {
                return Err(CoreError::Validation(format!(
                    "county '{}' has no usable name for a slug",
                    county.code
                )));
            }
            if !self.regions.iter().any(|r| r.code == county.region) {
                return Err(CoreError::Validation(format!(
                    "county '{slug}' names unknown region '{}'",
                    county.region
                )));
            }
            ensure_unique("city", county.cities.iter().map(CityFixture::slug))?;
            if county.cities.iter().filter(|c| c.capital).count() > 1 {
                return Err(CoreError::Validation(format!(
                    "county '{slug}' has more than one capital"
                )));
            }
        }
        Ok(())
    }

    /// Counties of the region with `code`, in fixture order.
    pub fn counties_of<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a CountyFixture> {
        self.counties.iter().filter(move |c| c.region == code)
    }

    /// Cities across every county of the region with `code`.
    pub fn region_city_count(&self, code: &str) -> usize {
        self.counties_of(code).map(|c| c.cities.len()).sum()
    }

    pub fn city_count(&self) -> usize {
        self.counties.iter().map(|c| c.cities.len()).sum()
    }
}
