// Generate parametric rules

use soroban_sdk::{Address, BytesN, Env, Symbol, Vec};

#[macro_export]
macro_rules! parametric_rule {
    ($f:ident) => {
        paste::paste! {
            // AdminInterface
            #[rule]
            pub fn [< $f _init_admin >](
                e: Env,
                account: Address
            ) {
                init_verification!(e);

                let params = ParametricParams::new(&e)
                    .with_caller(account.clone());

                $f(&e, &params, || {});
            }

            // UpgradeableContract - version
            #[rule]
            pub fn [< $f _version >](e: Env) {
                init_verification!(e);
                $f(&e, &ParametricParams::new(&e), || {});
            }

            // UpgradeableContract - commit_upgrade
            #[rule]
            pub fn [< $f _commit_upgrade >](
                e: Env,
                future_wasm: Option<BytesN<32>>,
                new_wasm_hash: BytesN<32>,
                upgrade_deadline: u64,
                caller_admin: Address
            ) {
                init_verification!(e);
                $f(&e, &ParametricParams::new(&e), || {});
            }

            // AccessControl - set_role_address
            #[rule]
            pub fn [< $f _set_role_address >](
                e: Env,
                emergency_admin: Option<Address>,
                role_name: Symbol,
                admin: Option<Address>,
                address: Address,
                emergency_mode: bool
            ) {
                init_verification!(e);
                $f(&e, &ParametricParams::new(&e), || {});
            }

            // AccessControl - set_emergency_mode
            #[rule]
            pub fn [< $f _set_emergency_mode >](
                caller_emergency_admin: Address,
                value: bool,
                e: Env
            ) {
                init_verification!(e);
                $f(&e, &ParametricParams::new(&e), || {});
            }
        }
    };
}
