use proptest::prelude::*;

use overlay_types::{Address, Amount, Network, TypesError, COIN, MAX_AMOUNT};

proptest! {
    /// Divisible strings with more than eight fractional digits are always rejected.
    #[test]
    fn divisible_rejects_excess_precision(
        whole in 0u64..1_000_000,
        fraction in "[0-9]{9,20}",
    ) {
        let input = format!("{whole}.{fraction}");
        prop_assert_eq!(
            Amount::parse(&input, true),
            Err(TypesError::TooManyDecimals(input.clone()))
        );
    }

    /// Indivisible strings containing a decimal point are always rejected.
    #[test]
    fn indivisible_rejects_any_decimal_point(whole in 0u64..1_000_000, fraction in "[0-9]{0,8}") {
        let input = format!("{whole}.{fraction}");
        prop_assert_eq!(
            Amount::parse(&input, false),
            Err(TypesError::FractionalIndivisible(input.clone()))
        );
    }

    /// Divisible parsing scales whole units by COIN and pads the fraction to eight digits.
    #[test]
    fn divisible_scaling(whole in 0i64..92_233_720_368, fraction in "[0-9]{1,8}") {
        let input = format!("{whole}.{fraction}");
        let padded: i64 = format!("{fraction:0<8}").parse().unwrap();
        let expected = i128::from(whole) * i128::from(COIN) + i128::from(padded);
        let parsed = Amount::parse(&input, true);
        if expected > i128::from(MAX_AMOUNT) {
            prop_assert!(matches!(parsed, Err(TypesError::AmountOutOfRange(_))));
        } else {
            prop_assert_eq!(i128::from(parsed.unwrap().raw()), expected);
        }
    }

    /// Values past the ceiling are reported as out of range rather than wrapped.
    #[test]
    fn above_ceiling_is_out_of_range(excess in 1u64..u64::MAX / 2) {
        let value = (MAX_AMOUNT as u64) + excess;
        let input = value.to_string();
        prop_assert!(matches!(
            Amount::parse(&input, false),
            Err(TypesError::AmountOutOfRange(_))
        ));
    }

    /// Formatting a non-negative amount yields a string that parses to the same amount.
    #[test]
    fn formatted_amounts_parse_back(raw in 0i64..=MAX_AMOUNT, divisible in any::<bool>()) {
        let amount = Amount::new(raw);
        prop_assert_eq!(Amount::parse(&amount.format(divisible), divisible), Ok(amount));
    }

    /// Addresses are only accepted on networks sharing their version byte.
    #[test]
    fn address_network_binding(hash in prop::array::uniform20(0u8..), script in any::<bool>()) {
        let version = if script {
            Network::Main.script_address_version()
        } else {
            Network::Main.pubkey_address_version()
        };
        let addr = Address::from_hash160(version, &hash);
        prop_assert!(Address::parse(addr.as_str(), Network::Main).is_ok());
        prop_assert!(Address::parse(addr.as_str(), Network::Test).is_err());
    }
}
