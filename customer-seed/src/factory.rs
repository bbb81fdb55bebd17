use chrono::{Local, Months, NaiveDate, TimeDelta};
use fake::faker::address::en::{
    BuildingNumber, CityName, PostCode, SecondaryAddress, StateAbbr, StreetName,
};
use fake::faker::internet::en::FreeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

use crate::customer::{flatten_address, Customer, BRANCH_ID};
use crate::error::SeedError;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 80;

/// Builds [`Customer`]s from the `fake` generators.
/// Birth dates are drawn so that every customer is between `min_age` and `max_age`
/// years old (inclusive) on the factory's `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerFactory {
    today: NaiveDate,
    /// Oldest allowed birth date, `max_age + 1` years ago plus one day
    earliest: NaiveDate,
    /// Youngest allowed birth date, exactly `min_age` years ago
    latest: NaiveDate,
}

fn years_before(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(years.checked_mul(12)?))
}

impl CustomerFactory {
    /// # Errors
    /// Errors only when `today` is so close to the calendar bounds that the
    /// default age window cannot be represented
    pub fn new(today: NaiveDate) -> Result<Self, SeedError> {
        Self::with_age_range(today, MIN_AGE, MAX_AGE)
    }

    /// # Errors
    /// Errors when the current local date cannot anchor the default age window
    pub fn today() -> Result<Self, SeedError> {
        Self::new(Local::now().date_naive())
    }

    /// # Errors
    /// Errors when `min_age` is greater than `max_age`, or when the window
    /// reaches outside the dates `chrono` can represent
    pub fn with_age_range(
        today: NaiveDate,
        min_age: u32,
        max_age: u32,
    ) -> Result<Self, SeedError> {
        let invalid = || SeedError::InvalidAgeRange { min_age, max_age };
        if min_age > max_age {
            return Err(invalid());
        }
        let latest = years_before(today, min_age).ok_or_else(invalid)?;
        let earliest = max_age
            .checked_add(1)
            .and_then(|years| years_before(today, years))
            .and_then(|date| date.succ_opt())
            .ok_or_else(invalid)?;

        Ok(CustomerFactory {
            today,
            earliest,
            latest,
        })
    }

    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.today
    }

    /// Inclusive `(earliest, latest)` bounds for generated birth dates
    #[must_use]
    pub fn birth_date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.earliest, self.latest)
    }

    pub fn date_of_birth<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let span = (self.latest - self.earliest).num_days();
        self.earliest + TimeDelta::days(rng.gen_range(0..=span))
    }

    /// A US-style postal address spanning two lines, the first of which carries
    /// an apartment or suite number half of the time. Zip codes are five digits,
    /// sometimes followed by a four digit extension.
    pub fn address<R: Rng>(&self, rng: &mut R) -> String {
        let building: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let mut street_line = format!("{building} {street}");
        if rng.gen_bool(0.5) {
            let unit: String = SecondaryAddress().fake_with_rng(rng);
            street_line.push(' ');
            street_line.push_str(&unit);
        }

        let city: String = CityName().fake_with_rng(rng);
        let state: String = StateAbbr().fake_with_rng(rng);
        let zip: String = PostCode().fake_with_rng(rng);
        format!("{street_line}\n{city}, {state} {zip}")
    }

    pub fn build<R: Rng>(&self, customer_id: u32, rng: &mut R) -> Customer {
        Customer {
            customer_id,
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            email: FreeEmail().fake_with_rng(rng),
            phone_number: PhoneNumber().fake_with_rng(rng),
            address: flatten_address(&self.address(rng)),
            date_of_birth: self.date_of_birth(rng),
            branch_id: BRANCH_ID,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn age_on(today: NaiveDate, born: NaiveDate) -> i32 {
        let years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years - 1
        } else {
            years
        }
    }

    #[test]
    fn test_birth_date_range() {
        let today = ymd(2024, 6, 15);
        let factory = CustomerFactory::new(today).unwrap();
        let (earliest, latest) = factory.birth_date_range();
        assert_eq!(earliest, ymd(1943, 6, 16));
        assert_eq!(latest, ymd(2006, 6, 15));
        assert_eq!(age_on(today, earliest), 80);
        assert_eq!(age_on(today, earliest.pred_opt().unwrap()), 81);
        assert_eq!(age_on(today, latest), 18);
        assert_eq!(age_on(today, latest.succ_opt().unwrap()), 17);
    }

    #[test]
    fn test_birth_date_range_leap_day() {
        let today = ymd(2028, 2, 29);
        let factory = CustomerFactory::new(today).unwrap();
        let (earliest, latest) = factory.birth_date_range();
        assert_eq!(earliest, ymd(1947, 3, 1));
        assert_eq!(latest, ymd(2010, 2, 28));
        assert_eq!(age_on(today, earliest), 80);
        assert_eq!(age_on(today, latest), 18);
    }

    #[test]
    fn test_invalid_age_range() {
        let today = ymd(2024, 6, 15);
        let res = CustomerFactory::with_age_range(today, 30, 20);
        assert!(matches!(
            res,
            Err(SeedError::InvalidAgeRange {
                min_age: 30,
                max_age: 20
            })
        ));
        assert!(CustomerFactory::with_age_range(today, 0, u32::MAX).is_err());

        // a single-year window is fine
        let factory = CustomerFactory::with_age_range(today, 40, 40).unwrap();
        let (earliest, latest) = factory.birth_date_range();
        assert!(earliest <= latest);
    }

    #[test]
    fn test_date_of_birth_within_window() {
        let today = ymd(2025, 1, 1);
        let factory = CustomerFactory::new(today).unwrap();
        let (earliest, latest) = factory.birth_date_range();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5_000 {
            let born = factory.date_of_birth(&mut rng);
            assert!(born >= earliest && born <= latest);
            let age = age_on(today, born);
            assert!((18..=80).contains(&age), "age {age} for {born}");
        }
    }

    #[test]
    fn test_address_has_two_lines() {
        let factory = CustomerFactory::new(ymd(2025, 1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let address = factory.address(&mut rng);
            assert_eq!(address.lines().count(), 2, "{address:?}");
            let flat = flatten_address(&address);
            assert!(!flat.contains('\n'));
            assert!(flat.contains(", "));

            let zip = address.rsplit(' ').next().unwrap();
            let (base, extension) = zip.split_once('-').unwrap_or((zip, "0000"));
            assert_eq!(base.len(), 5, "{address:?}");
            assert_eq!(extension.len(), 4, "{address:?}");
            assert!(base.chars().chain(extension.chars()).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_build_customer() {
        let today = ymd(2025, 1, 1);
        let factory = CustomerFactory::new(today).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let customer = factory.build(12, &mut rng);
        assert_eq!(customer.customer_id, 12);
        assert_eq!(customer.branch_id, BRANCH_ID);
        assert!(!customer.first_name.is_empty());
        assert!(!customer.last_name.is_empty());
        assert!(!customer.phone_number.is_empty());
        let (local, domain) = customer.email.split_once('@').unwrap();
        assert!(!local.is_empty());
        assert!(domain.contains('.'));
        assert!(!customer.address.contains('\n'));
        assert_eq!(factory.reference_date(), today);
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let factory = CustomerFactory::new(ymd(2025, 1, 1)).unwrap();
        let first = factory.build(1, &mut StdRng::seed_from_u64(99));
        let second = factory.build(1, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
