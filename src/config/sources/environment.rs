//! Environment source: CACONF_<SECTION>__<KEY>, e.g.
//! `CACONF_RESOLVER__FALLBACK_ROOTS=/conf/global,/apps/config`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("CACONF")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("resolver.fallback_roots")
            .try_parsing(true),
    )
}
