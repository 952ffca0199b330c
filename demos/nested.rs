//! Example decoding nested structs, maps and sequences

use std::collections::HashMap;

use nestenv::{Decode, FromEnv};

#[derive(Debug, Default, Decode)]
struct NetCnf {
    #[env(name = "Addr")]
    pub addr: String,
    #[env(name = "HTTPS")]
    pub https: bool,
}

#[derive(Debug, Default, Decode)]
struct MySection {
    #[env(name = "Values")]
    pub values: Vec<u64>,
}

#[derive(Debug, Default, Decode)]
#[env(prefix = "ACME-COORP")]
struct MyCnf {
    #[env(name = "Environment")]
    pub environment: String,

    // One entry per distinct key below ACME-COORP_Listen_
    #[env(name = "Listen")]
    pub listen: HashMap<String, NetCnf>,

    #[env(name = "ChRoot")]
    pub chroot: String,

    // Nested struct: ACME-COORP_MyFoo_Values_0, ACME-COORP_MyFoo_Values_1, ...
    #[env(name = "MyFoo")]
    pub my_foo: MySection,
}

fn main() -> anyhow::Result<()> {
    let vars = [
        ("ACME-COORP_Environment", "production"),
        ("ACME-COORP_Listen_internal_Addr", "127.0.0.1:80"),
        ("ACME-COORP_Listen_internal_HTTPS", "false"),
        ("ACME-COORP_Listen_public_Addr", "1.2.3.4:443"),
        ("ACME-COORP_Listen_public_HTTPS", "true"),
        ("ACME-COORP_ChRoot", "/var/empty"),
        ("ACME-COORP_MyFoo_Values_0", "3"),
        ("ACME-COORP_MyFoo_Values_1", "2"),
        ("ACME-COORP_MyFoo_Values_2", "1"),
        ("ACME-COORP_MyFoo_Values_3", "0"),
    ];
    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let config = MyCnf::from_env()?;
    println!("{config:#?}");

    Ok(())
}
