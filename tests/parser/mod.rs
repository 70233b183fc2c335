mod tests_properties;
mod tests_resolution;
mod tests_suffix;
