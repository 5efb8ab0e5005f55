pub mod buttons;
pub mod config;
pub mod eligibility;
pub mod purchase;
pub mod router;
pub mod site;
pub mod submission;
pub mod survey;
#[cfg(test)]
pub(crate) mod test_support;
