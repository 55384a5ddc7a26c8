use proptest::prelude::*;
use vetdir_core::PostalAlias;

use super::*;

fn n(value: u8) -> Option<u8> {
    Some(value)
}

// -----------------------------------------------------------------------
// resolve (postal addresses)
// -----------------------------------------------------------------------

#[test]
fn resolves_postal_suffix() {
    assert_eq!(resolve_address("1 Rue Y, 75011 Paris").map(District::get), n(11));
    assert_eq!(resolve_address("8 Rue de l'Opéra, 75001 Paris").map(District::get), n(1));
    assert_eq!(resolve_address("44 Rue de Belleville, 75020 Paris").map(District::get), n(20));
}

#[test]
fn resolves_administrative_alias() {
    assert_eq!(resolve_address("1 Rue Y, 75116 Paris").map(District::get), n(16));
}

#[test]
fn no_postal_code_is_no_match() {
    assert_eq!(resolve_address("1 Rue Y, Paris"), None);
}

#[test]
fn ignores_unrelated_digits() {
    assert_eq!(resolve_address("12 Rue du 11 Novembre, Paris"), None);
    assert_eq!(resolve_address("Bâtiment 750, Paris"), None);
}

#[test]
fn out_of_range_suffix_is_no_match() {
    assert_eq!(resolve_address("Paris 75000"), None);
    assert_eq!(resolve_address("Paris 75021"), None);
    assert_eq!(resolve_address("Paris 75099"), None);
}

#[test]
fn other_cities_postal_codes_do_not_resolve() {
    assert_eq!(resolve_address("3 Place Bellecour, 69002 Lyon"), None);
    assert_eq!(resolve_address("Avenue X, 92200 Neuilly-sur-Seine"), None);
}

#[test]
fn postal_code_glued_to_digits_is_ignored() {
    assert_eq!(resolve_address("Code 750111"), None);
}

#[test]
fn later_valid_code_wins_over_earlier_invalid_one() {
    assert_eq!(resolve_address("BP 75000, 5 Rue X 75005 Paris").map(District::get), n(5));
}

#[test]
fn suffix_rule_takes_precedence_over_alias() {
    assert_eq!(resolve_address("75116 puis 75015").map(District::get), n(15));
}

#[test]
fn resolver_honours_custom_profile() {
    let profile = CityProfile {
        name: "Lyon".to_string(),
        postal_prefix: "690".to_string(),
        district_count: 9,
        aliases: vec![PostalAlias {
            code: "69100".to_string(),
            district: 9,
        }],
        placeholder_name: "Vétérinaire".to_string(),
        placeholder_address: "Lyon".to_string(),
        default_set: None,
    };
    let resolver = DistrictResolver::new(&profile);
    assert_eq!(resolver.resolve("3 Place Bellecour, 69002 Lyon").map(District::get), n(2));
    assert_eq!(resolver.resolve("Rue X, 69010 Lyon"), None);
    assert_eq!(resolver.resolve("Villeurbanne 69100").map(District::get), n(9));
    assert_eq!(resolver.from_utterance("un véto à Lyon 3").map(District::get), n(3));
    assert_eq!(resolver.from_utterance("lyon 12"), None);
}

// -----------------------------------------------------------------------
// from_utterance
// -----------------------------------------------------------------------

#[test]
fn utterance_city_followed_by_number() {
    assert_eq!(district_from_utterance("Un vétérinaire Paris 11 ?").map(District::get), n(11));
    assert_eq!(district_from_utterance("paris15").map(District::get), n(15));
}

#[test]
fn utterance_ordinal_suffix() {
    assert_eq!(district_from_utterance("un véto dans le 16e").map(District::get), n(16));
    assert_eq!(district_from_utterance("Dans le 16ème svp").map(District::get), n(16));
    assert_eq!(district_from_utterance("le 3eme").map(District::get), n(3));
    assert_eq!(district_from_utterance("le 1er arrondissement").map(District::get), n(1));
}

#[test]
fn utterance_district_abbreviation() {
    assert_eq!(district_from_utterance("près du 15 arr.").map(District::get), n(15));
    assert_eq!(district_from_utterance("7 arrondissement").map(District::get), n(7));
}

#[test]
fn utterance_is_case_insensitive() {
    assert_eq!(district_from_utterance("PARIS 5").map(District::get), n(5));
    assert_eq!(district_from_utterance("LE 12E").map(District::get), n(12));
}

#[test]
fn utterance_out_of_range_is_no_match() {
    assert_eq!(district_from_utterance("paris 25"), None);
    assert_eq!(district_from_utterance("le 0e"), None);
    assert_eq!(district_from_utterance("le 21ème"), None);
}

#[test]
fn utterance_out_of_range_pattern_falls_through() {
    assert_eq!(district_from_utterance("paris 30, plutôt le 12e").map(District::get), n(12));
}

#[test]
fn utterance_without_district_is_none() {
    assert_eq!(district_from_utterance("Mon chat tousse, que faire ?"), None);
    assert_eq!(district_from_utterance("j'ai 2 chats"), None);
    assert_eq!(district_from_utterance("16 euros la consultation"), None);
}

// -----------------------------------------------------------------------
// ordinal_mention_re
// -----------------------------------------------------------------------

#[test]
fn ordinal_mention_requires_word_boundaries() {
    let re = DistrictResolver::ordinal_mention_re(District::new(16, 20).unwrap());
    assert!(re.is_match("avenue foch, paris 16e"));
    assert!(re.is_match("paris 16ème"));
    assert!(!re.is_match("paris 116e"));
    assert!(!re.is_match("paris 16"));
}

proptest! {
    #[test]
    fn proptest_resolved_district_is_always_in_range(address in "\\PC{0,60}") {
        if let Some(district) = resolve_address(&address) {
            prop_assert!((1..=20).contains(&district.get()));
        }
    }

    #[test]
    fn proptest_every_valid_suffix_resolves(value in 1u8..=20, street in "[A-Za-z ]{0,20}") {
        let address = format!("{street}, 750{value:02} Paris");
        prop_assert_eq!(resolve_address(&address).map(District::get), Some(value));
    }

    #[test]
    fn proptest_utterance_district_is_always_in_range(text in "\\PC{0,60}") {
        if let Some(district) = district_from_utterance(&text) {
            prop_assert!((1..=20).contains(&district.get()));
        }
    }
}
