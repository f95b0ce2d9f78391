use anyhow::Result;

use spindle_core::taxonomy::artist::{format_list, strip_disambiguation};
use spindle_core::taxonomy::Classifiers;
use spindle_etl::Config;

/// Build the classifiers from the rules in effect.
pub fn load_classifiers(config: &Config) -> Result<Classifiers> {
    Ok(Classifiers::from_rules(&config.rules()?))
}

pub fn color(classifiers: &Classifiers, description: &str) {
    let matched = classifiers.color.matches(description);
    println!("{}", classifiers.color.classify(description));

    if matched.len() > 1 {
        let labels: Vec<&str> = matched.iter().map(|label| label.as_str()).collect();
        println!("  matched: {}", labels.join(", "));
    }
}

pub fn region(classifiers: &Classifiers, country: &str) {
    for token in classifiers.region.parse(country) {
        println!("{token}");
    }
}

pub fn size(classifiers: &Classifiers, descriptors: &[String]) {
    println!("{}", classifiers.size.classify(descriptors));
}

pub fn edition(classifiers: &Classifiers, descriptors: &[String]) {
    let edition = &classifiers.edition;
    match edition.matching_rule(descriptors) {
        Some(rule) => println!("{} (rule: {})", rule.output, rule.name),
        None => println!("{}", edition.classify(descriptors)),
    }
}

pub fn artist(names: &[String]) {
    let cleaned: Vec<&str> = names.iter().map(|name| strip_disambiguation(name)).collect();
    println!("{}", format_list(&cleaned));
}
