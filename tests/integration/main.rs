mod common;
mod lifecycle;
mod outage;
