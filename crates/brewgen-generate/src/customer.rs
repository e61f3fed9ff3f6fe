use brewgen_core::CustomerRecord;

use crate::assets::{AssetsLoader, FIRST_NAMES_ASSET, LAST_NAMES_ASSET};
use crate::errors::GenerationError;
use crate::sampler::Sampler;

pub const CUSTOMER_COUNT: u32 = 250;
pub const MAX_LOYALTY_POINTS: u32 = 500;

/// First and last name pools customers are drawn from.
#[derive(Debug, Clone)]
pub struct NamePools {
    first: Vec<String>,
    last: Vec<String>,
}

impl NamePools {
    pub fn new(first: Vec<String>, last: Vec<String>) -> Result<Self, GenerationError> {
        if first.is_empty() || last.is_empty() {
            return Err(GenerationError::Asset(
                "name pools must not be empty".to_string(),
            ));
        }
        Ok(Self { first, last })
    }

    pub fn load(loader: &AssetsLoader) -> Result<Self, GenerationError> {
        Self::new(
            loader.load_lines(FIRST_NAMES_ASSET)?,
            loader.load_lines(LAST_NAMES_ASSET)?,
        )
    }

    pub fn first_names(&self) -> &[String] {
        &self.first
    }

    pub fn last_names(&self) -> &[String] {
        &self.last
    }
}

/// Builds the fixed customer roster.
#[derive(Debug, Clone, Copy)]
pub struct CustomerGenerator<'a> {
    names: &'a NamePools,
}

impl<'a> CustomerGenerator<'a> {
    pub fn new(names: &'a NamePools) -> Self {
        Self { names }
    }

    pub fn generate<S: Sampler>(&self, sampler: &mut S) -> Vec<CustomerRecord> {
        (1..=CUSTOMER_COUNT)
            .map(|id| CustomerRecord {
                id,
                first_name: sampler.choose(&self.names.first).cloned().unwrap_or_default(),
                last_name: sampler.choose(&self.names.last).cloned().unwrap_or_default(),
                phone_number: phone_number(sampler),
                loyalty_points: sampler.int_in(0, MAX_LOYALTY_POINTS),
            })
            .collect()
    }
}

/// `NXX-NXX-XXXX`, where N is 2-9 and X is 0-9.
pub fn phone_number<S: Sampler>(sampler: &mut S) -> String {
    let area = format!("{}{}", sampler.int_in(2, 9), sampler.digits(2));
    let exchange = format!("{}{}", sampler.int_in(2, 9), sampler.digits(2));
    let line = sampler.digits(4);
    format!("{area}-{exchange}-{line}")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::sampler::SeededSampler;

    fn pools() -> NamePools {
        NamePools::new(
            vec!["Ana".to_string(), "Ben".to_string()],
            vec!["Lee".to_string(), "Kim".to_string(), "Cox".to_string()],
        )
        .expect("pools")
    }

    #[test]
    fn roster_has_contiguous_ids() {
        let names = pools();
        let mut sampler = SeededSampler::new(4);
        let customers = CustomerGenerator::new(&names).generate(&mut sampler);

        assert_eq!(customers.len(), CUSTOMER_COUNT as usize);
        let ids: Vec<u32> = customers.iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=CUSTOMER_COUNT).collect::<Vec<u32>>());
        let unique: BTreeSet<u32> = ids.into_iter().collect();
        assert_eq!(unique.len(), CUSTOMER_COUNT as usize);

        for customer in &customers {
            assert!(names.first_names().contains(&customer.first_name));
            assert!(names.last_names().contains(&customer.last_name));
            assert!(customer.loyalty_points <= MAX_LOYALTY_POINTS);
        }
    }

    #[test]
    fn phone_numbers_follow_north_american_shape() {
        let mut sampler = SeededSampler::new(8);
        for _ in 0..500 {
            let phone = phone_number(&mut sampler);
            let groups: Vec<&str> = phone.split('-').collect();
            assert_eq!(groups.len(), 3, "{phone}");
            assert_eq!(groups[0].len(), 3);
            assert_eq!(groups[1].len(), 3);
            assert_eq!(groups[2].len(), 4);
            assert!(phone.chars().filter(|c| *c != '-').all(|c| c.is_ascii_digit()));
            for group in &groups[..2] {
                let lead = group.as_bytes()[0];
                assert!((b'2'..=b'9').contains(&lead), "{phone}");
            }
        }
    }

    #[test]
    fn empty_pools_are_rejected() {
        let result = NamePools::new(Vec::new(), vec!["Lee".to_string()]);
        assert!(matches!(result, Err(GenerationError::Asset(_))));
    }
}
