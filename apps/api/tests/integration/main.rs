mod helpers;
mod test_easy_reply;
mod test_smoke;
mod test_stats;
