//! Municipal collection-fee tariffs tiered by access-path length.

use rust_decimal::Decimal;
use serde::Deserialize;
use soprum_core::model::MunicipalityId;

/// One distance tier of a tariff.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeTier {
    /// Longest access path in meters the tier applies to (inclusive).
    pub max_access_path_m: u32,
    /// Annual collection fee for the tier.
    pub fee: Decimal,
}

/// Collection-fee tariff of one municipality.
#[derive(Debug, Clone, Deserialize)]
pub struct Tariff {
    /// Municipality the tariff belongs to.
    pub municipality_id: MunicipalityId,
    /// Tiers in any order.
    pub tiers: Vec<FeeTier>,
}

impl Tariff {
    /// Fee for an access path of `length_m` meters.
    ///
    /// Paths longer than every tier pay the most expensive distance tier.
    #[must_use]
    pub fn fee_for(&self, length_m: u32) -> Option<Decimal> {
        let mut tiers: Vec<&FeeTier> = self.tiers.iter().collect();
        tiers.sort_by_key(|tier| tier.max_access_path_m);
        tiers
            .iter()
            .find(|tier| length_m <= tier.max_access_path_m)
            .or_else(|| tiers.last())
            .map(|tier| tier.fee)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn tariff() -> Tariff {
        Tariff {
            municipality_id: MunicipalityId(1),
            tiers: vec![
                FeeTier {
                    max_access_path_m: 25,
                    fee: dec!(1450),
                },
                FeeTier {
                    max_access_path_m: 10,
                    fee: dec!(1200),
                },
            ],
        }
    }

    #[test]
    fn picks_first_covering_tier() {
        assert_eq!(tariff().fee_for(0), Some(dec!(1200)), "short path");
        assert_eq!(tariff().fee_for(10), Some(dec!(1200)), "inclusive bound");
        assert_eq!(tariff().fee_for(11), Some(dec!(1450)), "next tier");
    }

    #[test]
    fn long_paths_pay_last_tier() {
        assert_eq!(tariff().fee_for(80), Some(dec!(1450)), "beyond tiers");
    }

    #[test]
    fn empty_tariff_has_no_fee() {
        let empty = Tariff {
            municipality_id: MunicipalityId(1),
            tiers: Vec::new(),
        };
        assert_eq!(empty.fee_for(5), None, "no tiers");
    }
}
