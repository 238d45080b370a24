pub mod codon;
pub mod dna;
