mod tests_cache;
mod tests_path_resolution;
