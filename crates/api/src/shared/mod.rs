pub mod guard;
#[cfg(test)]
pub mod testing;
pub mod usecase;
