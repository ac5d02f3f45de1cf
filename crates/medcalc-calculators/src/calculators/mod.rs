pub mod adhere;
pub mod berlin;
pub mod bode;
pub mod ckd_epi;
pub mod curb65;
pub mod diarem;
pub mod mayo_spn;
pub mod perc;
pub mod psi;
