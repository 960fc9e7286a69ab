//! Success summary

use crate::environment::ProvisioningResult;

pub const SUCCESS_HEADER: &str = "Successfully Cloned Site!";

/// Summary shown after a successful clone
///
/// One homepage/admin pair per host, in domain order, separated by a blank
/// line.
pub fn format(result: &ProvisioningResult) -> String {
    let scheme = result.scheme();
    let blocks: Vec<String> = result
        .domain
        .hosts()
        .iter()
        .map(|host| format!("Homepage: {scheme}://{host}/\nWP admin: {scheme}://{host}/wp-admin/"))
        .collect();

    format!("{SUCCESS_HEADER}\n\n{}", blocks.join("\n\n"))
}
