#[cfg(test)]
mod mocks;
