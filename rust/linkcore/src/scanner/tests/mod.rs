mod mention_tests;
