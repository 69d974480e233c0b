pub mod muscle_group_seed;
