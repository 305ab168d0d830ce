#![allow(dead_code)]

// tests/common/mod.rs

// Logging is auto-installed for every test binary that declares `mod common`.
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

// Flow tests span several requests against the same private in-memory
// database, so successful transactions must commit. `CLASSMATE_TXN_POLICY`
// can still pin the policy for a binary before this ctor runs.
#[ctor::ctor]
fn init_txn_policy() {
    backend::db::txn_policy::init_from_env();
    backend::db::txn_policy::set_txn_policy(backend::db::txn_policy::TxnPolicy::CommitOnOk);
}
