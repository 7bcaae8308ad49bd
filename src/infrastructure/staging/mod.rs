mod fs_staging_area;

pub use fs_staging_area::FsStagingArea;
