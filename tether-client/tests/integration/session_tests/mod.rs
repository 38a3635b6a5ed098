mod test_local_candidate_queue;
