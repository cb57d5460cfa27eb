pub mod import;
pub mod migrate;
pub mod redact;
pub mod report;
pub mod run;
pub mod scrub;

use mailscrub_config::Config;
use mailscrub_security::{ExclusionList, RedactionPipeline, ScrubRules};

/// Build the redaction pipeline described by the config
pub fn pipeline(config: &Config) -> RedactionPipeline {
    let rules = ScrubRules {
        member_link_marker: config.scrub.member_link_marker.clone(),
        section_phrase: config.scrub.section_phrase.clone(),
    };
    RedactionPipeline::new(
        ExclusionList::new(config.excludes.iter().cloned()),
        config.redaction_string.clone(),
    )
    .with_rules(rules)
}
