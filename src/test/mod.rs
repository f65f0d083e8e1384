mod amfi;
mod export;
mod holding;
