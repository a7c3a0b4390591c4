// procedural brutalist concrete assemblies, generator core and scene plugins

pub mod config;
pub mod systems;

#[cfg(test)]
pub mod test;
